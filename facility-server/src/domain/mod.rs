//! Core domain types for the facility engine.

mod coords;
mod facility;
pub mod hours;

pub use coords::{Coordinates, InvalidCoordinates};
pub use facility::{Facility, QueryResult};
pub use hours::{HoursError, OperatingHours};
