//! Data Transfer Objects for REST request/response serialization.

pub mod room_dto;
pub mod trip_dto;

pub use room_dto::*;
pub use trip_dto::*;
