//! Trip-planning handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::Value;

use crate::api::dto::{TripPlanFailureResponse, TripPlanRequest, TripPlanResponse};
use crate::app_state::AppState;
use crate::domain::TripQuery;
use crate::error::{ErrorResponse, ServiceError};

/// `POST /api/trip-plan`: Plan a trip.
///
/// Validation failures are rejected before any upstream call. Upstream
/// failures still answer with the locally computed summary.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] on missing or malformed fields.
#[utoipa::path(
    post,
    path = "/api/trip-plan",
    tag = "Trips",
    summary = "Plan a trip",
    description = "Returns a cached plan if one matches exactly, otherwise asks the generative backend.",
    request_body = TripPlanRequest,
    responses(
        (status = 200, description = "Plan served", body = TripPlanResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Upstream failure with partial result", body = TripPlanFailureResponse),
    )
)]
pub async fn plan_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripPlanRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(req) = payload.map_err(|e| ServiceError::Validation(e.body_text()))?;
    let query = parse_trip_request(&req)?;

    match state.trips.plan(&query).await {
        Ok(plan) => Ok(Json(TripPlanResponse {
            success: true,
            source: plan.source,
            summary: plan.summary,
            per_day_budget: plan.per_day_budget,
            plan: plan.plan,
            generated_at: Utc::now(),
        })
        .into_response()),
        Err(failure) => {
            let body = TripPlanFailureResponse {
                success: false,
                code: failure.error.error_code(),
                message: failure.error.to_string(),
                plan: failure.degraded_plan(),
                summary: failure.summary,
                per_day_budget: failure.per_day_budget,
            };
            Ok((failure.error.status_code(), Json(body)).into_response())
        }
    }
}

/// Trip routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/trip-plan", post(plan_trip))
}

/// Turns the raw request fields into a validated [`TripQuery`].
fn parse_trip_request(req: &TripPlanRequest) -> Result<TripQuery, ServiceError> {
    let origin = required_text(req.from.as_ref(), "from")?;
    let destination = required_text(req.to.as_ref(), "to")?;

    let days = required_number(req.days.as_ref(), "days")?;
    if days.fract() != 0.0 || days < 1.0 || days > f64::from(u32::MAX) {
        return Err(ServiceError::Validation(
            "days must be a positive whole number".to_string(),
        ));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days = days as u32;

    let budget = required_number(req.budget.as_ref(), "budget")?;

    TripQuery::new(origin, destination, days, budget)
}

fn required_text<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a str, ServiceError> {
    match value {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ServiceError::Validation(format!("{field} must be a string"))),
        None => Err(ServiceError::Validation(format!("missing {field}"))),
    }
}

fn required_number(value: Option<&Value>, field: &str) -> Result<f64, ServiceError> {
    let invalid = || ServiceError::Validation(format!("{field} must be a number"));
    match value {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
        None => Err(ServiceError::Validation(format!("missing {field}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> TripPlanRequest {
        serde_json::from_value(body).unwrap_or_default()
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let req = request(json!({"from": "Chennai", "to": "Goa", "days": "3", "budget": 9000}));
        let query = parse_trip_request(&req).ok();
        assert_eq!(query.as_ref().map(TripQuery::days), Some(3));
        assert_eq!(query.map(|q| q.budget_text()), Some("9000".to_string()));
    }

    #[test]
    fn rejects_missing_field() {
        let req = request(json!({"from": "Chennai", "to": "Goa", "days": 3}));
        let err = parse_trip_request(&req).err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("invalid request: missing budget"));
    }

    #[test]
    fn rejects_fractional_days() {
        let req = request(json!({"from": "A", "to": "B", "days": 2.5, "budget": 100}));
        assert!(matches!(
            parse_trip_request(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn rejects_wrong_types() {
        let req = request(json!({"from": 7, "to": "B", "days": 1, "budget": 100}));
        assert!(parse_trip_request(&req).is_err());
        let req = request(json!({"from": "A", "to": "B", "days": 1, "budget": "lots"}));
        assert!(parse_trip_request(&req).is_err());
    }
}
