//! Adapters for third-party collaborators used by trip planning.
//!
//! Both collaborators sit behind a trait so the trip service can run with
//! either, both, or neither configured, and so tests can substitute them.

pub mod generative;
pub mod sheets;

use std::time::Duration;

use async_trait::async_trait;

pub use generative::GeminiClient;
pub use sheets::SheetsClient;

use crate::domain::TripQuery;

/// Longest upstream body excerpt kept in a diagnostic.
const BODY_EXCERPT_CHARS: usize = 200;

/// Failure of an upstream collaborator.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Connection, TLS, or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Response parsed but lacked a required field.
    #[error("response missing {0}")]
    MissingField(&'static str),

    /// Collaborator has no configuration.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The overall budget for a trip plan ran out.
    #[error("no plan within {0:?}")]
    Timeout(Duration),

    /// A request URL could not be built from configuration.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(BODY_EXCERPT_CHARS)
            .collect();
        Self::Status { status, body }
    }
}

/// Produces free-text trip plans from a prompt.
#[async_trait]
pub trait PlanGenerator: Send + Sync + std::fmt::Debug {
    /// Returns generated text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] if the backend fails or answers with
    /// an unusable body.
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Looks up a previously stored plan for an exact trip.
#[async_trait]
pub trait PlanLookup: Send + Sync + std::fmt::Debug {
    /// Returns the most recent stored plan matching `query`, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] if the dataset cannot be read.
    async fn find_plan(&self, query: &TripQuery) -> Result<Option<String>, UpstreamError>;
}

/// Builds the shared outbound client with a per-request timeout.
///
/// # Errors
///
/// Returns [`UpstreamError::Transport`] if the TLS backend fails to
/// initialize.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, UpstreamError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
