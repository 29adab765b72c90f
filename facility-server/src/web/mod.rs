//! Web presentation layer.
//!
//! Thin JSON glue over [`FacilityFinder`](crate::query::FacilityFinder):
//! handlers parse and validate request parameters, call the facade, and
//! shape responses. All user-facing state (chosen filters, selected
//! facility, current location) travels in each request; nothing is kept
//! server-side between requests.

mod dto;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
