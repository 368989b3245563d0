//! # room-inventory
//!
//! REST API for a hotel's room-availability counter, plus a trip-planning
//! relay to a generative-text backend with an optional spreadsheet cache.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── InventoryService, TripService (service/)
//!     │
//!     ├── InventoryStore (persistence/)
//!     │     ├── PostgreSQL
//!     │     └── in-memory
//!     │
//!     └── PlanGenerator, PlanLookup (upstream/)
//! ```
//!
//! Booking and release are single conditional updates in the store, so
//! concurrent requests can neither oversell nor overfill the pool.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod upstream;
