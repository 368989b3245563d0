//! Trip service: cached lookup first, generation second, never a crash.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::TripQuery;
use crate::error::ServiceError;
use crate::upstream::{PlanGenerator, PlanLookup, UpstreamError};

/// Where a returned plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// Found in the spreadsheet cache.
    Cache,
    /// Produced by the generative-text backend.
    Generated,
}

/// A plan with the locally computed figures.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    /// Where `plan` came from.
    pub source: PlanSource,
    /// Locally computed one-line summary.
    pub summary: String,
    /// Budget per day.
    pub per_day_budget: f64,
    /// Plan text.
    pub plan: String,
}

/// Upstream failure carrying everything that could still be computed.
#[derive(Debug)]
pub struct TripFailure {
    /// Locally computed one-line summary.
    pub summary: String,
    /// Budget per day.
    pub per_day_budget: f64,
    /// The failure, as a [`ServiceError::Upstream`].
    pub error: ServiceError,
}

impl TripFailure {
    fn new(query: &TripQuery, cause: &UpstreamError) -> Self {
        Self {
            summary: query.summary(),
            per_day_budget: query.per_day_budget(),
            error: ServiceError::Upstream(cause.to_string()),
        }
    }

    /// The summary with the diagnostic appended in brackets.
    #[must_use]
    pub fn degraded_plan(&self) -> String {
        format!("{} [{}]", self.summary, self.error)
    }
}

/// Orchestrates plan lookup and generation.
#[derive(Debug, Clone)]
pub struct TripService {
    generator: Option<Arc<dyn PlanGenerator>>,
    lookup: Option<Arc<dyn PlanLookup>>,
    deadline: Duration,
}

impl TripService {
    /// Creates a service with the given collaborators; either may be absent.
    ///
    /// `deadline` bounds a whole [`plan`](Self::plan) call, however many
    /// upstream requests it makes.
    #[must_use]
    pub fn new(
        generator: Option<Arc<dyn PlanGenerator>>,
        lookup: Option<Arc<dyn PlanLookup>>,
        deadline: Duration,
    ) -> Self {
        Self {
            generator,
            lookup,
            deadline,
        }
    }

    /// Returns a plan for `query`.
    ///
    /// A lookup failure is logged and falls through to generation.
    ///
    /// # Errors
    ///
    /// Returns a [`TripFailure`] if no plan is cached and generation fails,
    /// is not configured, or does not finish within the deadline.
    pub async fn plan(&self, query: &TripQuery) -> Result<TripPlan, TripFailure> {
        match tokio::time::timeout(self.deadline, self.resolve(query)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(trip = %query, deadline = ?self.deadline, "trip plan timed out");
                Err(TripFailure::new(query, &UpstreamError::Timeout(self.deadline)))
            }
        }
    }

    async fn resolve(&self, query: &TripQuery) -> Result<TripPlan, TripFailure> {
        let summary = query.summary();
        let per_day_budget = query.per_day_budget();

        if let Some(lookup) = &self.lookup {
            match lookup.find_plan(query).await {
                Ok(Some(plan)) => {
                    tracing::info!(trip = %query, "plan served from cache");
                    return Ok(TripPlan {
                        source: PlanSource::Cache,
                        summary,
                        per_day_budget,
                        plan,
                    });
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(trip = %query, error = %e, "plan lookup failed"),
            }
        }

        let Some(generator) = &self.generator else {
            return Err(TripFailure::new(
                query,
                &UpstreamError::NotConfigured("generative backend"),
            ));
        };

        match generator.generate(&query.prompt()).await {
            Ok(plan) => {
                tracing::info!(trip = %query, "plan generated");
                Ok(TripPlan {
                    source: PlanSource::Generated,
                    summary,
                    per_day_budget,
                    plan,
                })
            }
            Err(e) => {
                tracing::warn!(trip = %query, error = %e, "plan generation failed");
                Err(TripFailure::new(query, &e))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    const DEADLINE: Duration = Duration::from_secs(5);

    #[derive(Debug, Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl PlanGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            if self.fail {
                Err(UpstreamError::Status {
                    status: 503,
                    body: "overloaded".to_string(),
                })
            } else {
                Ok("Day 1: arrive".to_string())
            }
        }
    }

    #[derive(Debug)]
    struct FixedLookup(Result<Option<String>, ()>);

    #[async_trait]
    impl PlanLookup for FixedLookup {
        async fn find_plan(&self, _query: &TripQuery) -> Result<Option<String>, UpstreamError> {
            self.0
                .clone()
                .map_err(|()| UpstreamError::Malformed("bad sheet".to_string()))
        }
    }

    fn query() -> TripQuery {
        let Ok(q) = TripQuery::new("Chennai", "Goa", 2, 5000.0) else {
            panic!("valid query");
        };
        q
    }

    fn prompt_count(generator: &RecordingGenerator) -> usize {
        generator.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }

    #[tokio::test]
    async fn cache_hit_skips_generation() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = TripService::new(
            Some(Arc::clone(&generator) as Arc<dyn PlanGenerator>),
            Some(Arc::new(FixedLookup(Ok(Some("cached".to_string()))))),
            DEADLINE,
        );

        let Ok(plan) = service.plan(&query()).await else {
            panic!("expected plan");
        };
        assert_eq!(plan.source, PlanSource::Cache);
        assert_eq!(plan.plan, "cached");
        assert_eq!(plan.per_day_budget, 2500.0);
        assert_eq!(prompt_count(&generator), 0);
    }

    #[tokio::test]
    async fn cache_miss_generates_from_prompt() {
        let generator = Arc::new(RecordingGenerator::default());
        let service = TripService::new(
            Some(Arc::clone(&generator) as Arc<dyn PlanGenerator>),
            Some(Arc::new(FixedLookup(Ok(None)))),
            DEADLINE,
        );

        let Ok(plan) = service.plan(&query()).await else {
            panic!("expected plan");
        };
        assert_eq!(plan.source, PlanSource::Generated);
        assert_eq!(plan.plan, "Day 1: arrive");

        let prompts = generator.prompts.lock().map(|p| p.clone()).unwrap_or_default();
        assert_eq!(prompts.len(), 1);
        assert!(prompts.iter().all(|p| p.contains("Destination: Goa")));
    }

    #[tokio::test]
    async fn lookup_error_falls_through_to_generation() {
        let service = TripService::new(
            Some(Arc::new(RecordingGenerator::default())),
            Some(Arc::new(FixedLookup(Err(())))),
            DEADLINE,
        );
        let Ok(plan) = service.plan(&query()).await else {
            panic!("expected plan");
        };
        assert_eq!(plan.source, PlanSource::Generated);
    }

    #[tokio::test]
    async fn generation_failure_keeps_summary() {
        let service = TripService::new(
            Some(Arc::new(RecordingGenerator {
                fail: true,
                ..RecordingGenerator::default()
            })),
            None,
            DEADLINE,
        );
        let Err(failure) = service.plan(&query()).await else {
            panic!("expected failure");
        };
        assert_eq!(failure.per_day_budget, 2500.0);
        assert!(matches!(failure.error, ServiceError::Upstream(_)));

        let degraded = failure.degraded_plan();
        assert!(degraded.starts_with("Trip from Chennai to Goa"));
        assert!(degraded.ends_with(']'));
        assert!(degraded.contains("HTTP 503"));
    }

    #[tokio::test]
    async fn missing_generator_is_reported() {
        let service = TripService::new(None, None, DEADLINE);
        let Err(failure) = service.plan(&query()).await else {
            panic!("expected failure");
        };
        assert!(failure.degraded_plan().contains("not configured"));
    }

    #[derive(Debug)]
    struct StalledGenerator(Duration);

    #[async_trait]
    impl PlanGenerator for StalledGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            tokio::time::sleep(self.0).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn deadline_bounds_the_whole_resolution() {
        let service = TripService::new(
            Some(Arc::new(StalledGenerator(Duration::from_secs(2)))),
            Some(Arc::new(FixedLookup(Ok(None)))),
            Duration::from_millis(100),
        );
        let Err(failure) = service.plan(&query()).await else {
            panic!("expected timeout");
        };
        assert_eq!(failure.per_day_budget, 2500.0);
        let degraded = failure.degraded_plan();
        assert!(degraded.starts_with("Trip from Chennai to Goa"));
        assert!(degraded.contains("no plan within 100ms"));
    }
}
