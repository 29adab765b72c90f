//! Routing and geocoding provider boundary.
//!
//! The engine consumes an external routing/geocoding service through the
//! narrow [`RoutingProvider`] trait: geocode an address, fetch travel
//! distance/duration between two points, or fetch a full route with path
//! geometry. Everything provider-specific (wire shapes, status strings,
//! auth) stays behind this boundary, so the engine and its tests never
//! depend on the network.
//!
//! Provider operations are idempotent and safe to retry, but no retries
//! happen at this layer; retry policy belongs to callers.

mod cache;
mod client;
mod error;
mod mock;
pub mod polyline;
mod provider;
mod types;

pub use cache::{CachedRoutingProvider, RoutingCacheConfig};
pub use client::{MapsClient, MapsConfig};
pub use error::RouteError;
pub use mock::MockRoutingProvider;
pub use provider::{InvalidTravelMode, RouteInfo, RoutingProvider, TravelMode};
