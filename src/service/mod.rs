//! Service layer: business logic orchestration.
//!
//! [`InventoryService`] enforces room-pool bounds over an
//! [`crate::persistence::InventoryStore`]. [`TripService`] answers validated
//! trip queries from the plan cache or the generative backend.

pub mod inventory_service;
pub mod trip_service;

pub use inventory_service::InventoryService;
pub use trip_service::{PlanSource, TripFailure, TripPlan, TripService};
