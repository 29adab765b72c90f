//! Operating-hours parsing and the open/closed check.
//!
//! Facility hours arrive as a single daily window string in the form
//! `"9:00AM-9:00PM"` (12-hour clock, one window per day, no per-day-of-week
//! variation). This module parses that format and answers whether a facility
//! is open at a given instant.
//!
//! The evaluation instant is always an explicit parameter. Nothing in this
//! module reads the wall clock, so the check is deterministic and testable
//! at any time of day.

use chrono::{NaiveTime, Timelike};

/// Error returned when parsing an invalid hours string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HoursError {
    /// The string did not split into exactly two parts on `-`.
    #[error("expected exactly one '-' between open and close times")]
    Separator,

    /// A bound was missing its AM/PM marker.
    #[error("missing AM/PM marker")]
    MissingMeridiem,

    /// A bound was not a parseable `H:MM` clock time.
    #[error("expected a clock time like 9:00")]
    Clock,

    /// Hour outside 1-12.
    #[error("hour must be 1-12")]
    HourRange,

    /// Minute outside 0-59.
    #[error("minute must be 0-59")]
    MinuteRange,
}

/// A parsed daily operating window, stored as minutes since midnight.
///
/// # Examples
///
/// ```
/// use facility_server::domain::OperatingHours;
/// use chrono::NaiveTime;
///
/// let window = OperatingHours::parse("9:00AM-9:00PM").unwrap();
/// assert_eq!(window.open_minutes(), 540);
/// assert_eq!(window.close_minutes(), 1260);
///
/// let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
/// assert!(window.contains(ten));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingHours {
    open: u16,
    close: u16,
}

impl OperatingHours {
    /// Parse a window string in the form `"<start>-<end>"`.
    ///
    /// Each bound is a 12-hour clock time with an AM/PM marker, e.g.
    /// `"9:00AM"` or `"12:30pm"`. The marker is case-insensitive and
    /// surrounding whitespace is tolerated.
    pub fn parse(s: &str) -> Result<Self, HoursError> {
        let mut parts = s.split('-');
        let (open_str, close_str) = match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) => (open, close),
            _ => return Err(HoursError::Separator),
        };

        Ok(Self {
            open: parse_clock(open_str)?,
            close: parse_clock(close_str)?,
        })
    }

    /// Opening bound in minutes since midnight (0-1439).
    pub fn open_minutes(&self) -> u16 {
        self.open
    }

    /// Closing bound in minutes since midnight (0-1439).
    pub fn close_minutes(&self) -> u16 {
        self.close
    }

    /// Whether the instant falls within the window, inclusive at both ends.
    ///
    /// The date is irrelevant; only the wall-clock time of day is compared,
    /// at minute precision. A window whose close bound is numerically before
    /// its open bound matches no instant (windows crossing midnight are not
    /// supported; such a window is treated as always closed rather than
    /// guessing wrap-around semantics).
    pub fn contains(&self, at: NaiveTime) -> bool {
        let current = (at.hour() * 60 + at.minute()) as u16;
        self.open <= current && current <= self.close
    }
}

/// Check whether a raw hours string is open at the given instant.
///
/// A string that fails to parse is treated as "closed": the failure is
/// logged and `false` is returned, so one bad record degrades that facility
/// rather than failing the whole query.
pub fn is_open(hours: &str, at: NaiveTime) -> bool {
    match OperatingHours::parse(hours) {
        Ok(window) => window.contains(at),
        Err(e) => {
            tracing::warn!(hours, error = %e, "unparseable hours string treated as closed");
            false
        }
    }
}

/// Parse a 12-hour clock time like `"9:00AM"` into minutes since midnight.
fn parse_clock(s: &str) -> Result<u16, HoursError> {
    let s = s.trim();
    if !s.is_ascii() || s.len() < 3 {
        return Err(HoursError::Clock);
    }

    let (clock, meridiem) = s.split_at(s.len() - 2);
    let pm = if meridiem.eq_ignore_ascii_case("PM") {
        true
    } else if meridiem.eq_ignore_ascii_case("AM") {
        false
    } else {
        return Err(HoursError::MissingMeridiem);
    };

    let clock = clock.trim();
    let (hour_str, minute_str) = clock.split_once(':').ok_or(HoursError::Clock)?;

    let hour: u16 = hour_str.parse().map_err(|_| HoursError::Clock)?;
    let minute: u16 = minute_str.parse().map_err(|_| HoursError::Clock)?;

    if !(1..=12).contains(&hour) {
        return Err(HoursError::HourRange);
    }
    if minute > 59 {
        return Err(HoursError::MinuteRange);
    }

    // 12AM is midnight, 12PM is noon
    let mut minutes = (hour % 12) * 60 + minute;
    if pm {
        minutes += 720;
    }
    Ok(minutes)
}
