//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{InventoryService, TripService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Room-pool business logic.
    pub inventory: Arc<InventoryService>,
    /// Trip planning relay.
    pub trips: Arc<TripService>,
}
