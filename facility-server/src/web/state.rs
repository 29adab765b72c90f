//! Application state for the web layer.

use std::sync::Arc;

use crate::query::FacilityFinder;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The query facade all handlers go through.
    pub finder: Arc<FacilityFinder>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(finder: FacilityFinder) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }
}
