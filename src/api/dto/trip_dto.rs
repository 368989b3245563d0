//! Trip-planning DTOs.
//!
//! Request fields are kept as raw JSON so that a wrong type is reported
//! as a validation error naming the field, not as a generic body error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::PlanSource;

/// Request body for `POST /api/trip-plan`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TripPlanRequest {
    /// Starting location.
    #[serde(default)]
    #[schema(value_type = String)]
    pub from: Option<serde_json::Value>,
    /// Destination.
    #[serde(default)]
    #[schema(value_type = String)]
    pub to: Option<serde_json::Value>,
    /// Number of days (positive integer, number or numeric string).
    #[serde(default)]
    #[schema(value_type = u32)]
    pub days: Option<serde_json::Value>,
    /// Total budget (positive, number or numeric string).
    #[serde(default)]
    #[schema(value_type = f64)]
    pub budget: Option<serde_json::Value>,
}

/// Response body for a served plan.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripPlanResponse {
    /// Always `true`.
    pub success: bool,
    /// Where the plan came from.
    pub source: PlanSource,
    /// Locally computed summary.
    pub summary: String,
    /// Budget per day.
    pub per_day_budget: f64,
    /// Plan text.
    pub plan: String,
    /// Response timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Response body when the upstream collaborators could not produce a plan.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripPlanFailureResponse {
    /// Always `false`.
    pub success: bool,
    /// Numeric error code.
    pub code: u32,
    /// Upstream diagnostic.
    pub message: String,
    /// Locally computed summary.
    pub summary: String,
    /// Budget per day.
    pub per_day_budget: f64,
    /// Summary with the bracketed diagnostic appended.
    pub plan: String,
}
