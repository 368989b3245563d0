//! REST endpoint handlers organized by resource.

pub mod rooms;
pub mod system;
pub mod trips;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(rooms::routes()).merge(trips::routes())
}
