//! Validated trip-planning request.
//!
//! [`TripQuery`] is built once at the request boundary and is the only
//! form of trip input the service and upstream adapters ever see.

use std::fmt;

use crate::error::ServiceError;

/// A trip request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    origin: String,
    destination: String,
    days: u32,
    budget: f64,
}

impl TripQuery {
    /// Validates and builds a query.
    ///
    /// Locations are trimmed and must be non-empty; `days` must be at
    /// least 1; `budget` must be finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] naming the offending field.
    pub fn new(
        origin: &str,
        destination: &str,
        days: u32,
        budget: f64,
    ) -> Result<Self, ServiceError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() {
            return Err(ServiceError::Validation("from must not be empty".to_string()));
        }
        if destination.is_empty() {
            return Err(ServiceError::Validation("to must not be empty".to_string()));
        }
        if days == 0 {
            return Err(ServiceError::Validation("days must be at least 1".to_string()));
        }
        if !budget.is_finite() || budget <= 0.0 {
            return Err(ServiceError::Validation(
                "budget must be a positive number".to_string(),
            ));
        }
        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            days,
            budget,
        })
    }

    /// Starting location.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Number of days.
    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Total budget.
    #[must_use]
    pub const fn budget(&self) -> f64 {
        self.budget
    }

    /// Budget per day, rounded to two decimals.
    #[must_use]
    pub fn per_day_budget(&self) -> f64 {
        (self.budget / f64::from(self.days) * 100.0).round() / 100.0
    }

    /// Canonical text of `days` used for exact-match lookups.
    #[must_use]
    pub fn days_text(&self) -> String {
        self.days.to_string()
    }

    /// Canonical text of `budget` used for exact-match lookups.
    ///
    /// Whole amounts render without a fractional part (`5000`, not `5000.0`).
    #[must_use]
    pub fn budget_text(&self) -> String {
        self.budget.to_string()
    }

    /// One-line summary computed without any upstream call.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Trip from {} to {} for {} day(s) with a total budget of {} (about {:.2} per day).",
            self.origin,
            self.destination,
            self.days,
            self.budget_text(),
            self.per_day_budget()
        )
    }

    /// Structured prompt for the generative-text backend.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "You are a travel planner. Create a day-by-day itinerary.\n\
             Origin: {}\n\
             Destination: {}\n\
             Number of days: {}\n\
             Total budget: {}\n\
             Budget per day: {:.2}\n\
             For each day list activities, food suggestions, and an estimated cost \
             that keeps the total within budget.",
            self.origin,
            self.destination,
            self.days,
            self.budget_text(),
            self.per_day_budget()
        )
    }
}

impl fmt::Display for TripQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({} days)", self.origin, self.destination, self.days)
    }
}
