//! Domain layer: request types shared by services and adapters.

pub mod trip;

pub use trip::TripQuery;
