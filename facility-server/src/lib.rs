//! Facility proximity and status engine.
//!
//! A web-backed engine that answers: "which facilities near me are open
//! right now, and how long will it take to get there?"

pub mod catalog;
pub mod domain;
pub mod geo;
pub mod query;
pub mod routing;
pub mod web;
