//! Generative-text backend speaking the Gemini `generateContent` API.
//!
//! If the configured model answers 404, the client lists the available
//! models once, switches to the first one that supports
//! `generateContent`, and retries. The discovered model is kept for
//! later calls.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{PlanGenerator, UpstreamError};
use crate::config::GenerativeConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_METHOD: &str = "generateContent";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

/// Gemini REST client implementing [`PlanGenerator`].
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: RwLock<String>,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client using `client` for transport.
    #[must_use]
    pub fn new(client: reqwest::Client, config: &GenerativeConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: RwLock::new(config.model.clone()),
        }
    }

    /// Model currently used for generation.
    pub async fn model(&self) -> String {
        self.model.read().await.clone()
    }

    async fn generate_with(&self, model: &str, prompt: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/v1beta/models/{model}:{GENERATE_METHOD}", self.base_url);
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let text = response.text().await?;
        extract_text(&text)
    }

    async fn discover_model(&self) -> Result<String, UpstreamError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let text = response.text().await?;
        let list: ModelList =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        list.models
            .into_iter()
            .find(|m| m.supported_generation_methods.iter().any(|g| g == GENERATE_METHOD))
            .map(|m| m.name.trim_start_matches("models/").to_string())
            .ok_or(UpstreamError::MissingField("a model supporting generateContent"))
    }
}

#[async_trait]
impl PlanGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let model = self.model().await;
        match self.generate_with(&model, prompt).await {
            Err(UpstreamError::Status { status: 404, .. }) => {
                let discovered = self.discover_model().await?;
                tracing::warn!(configured = %model, %discovered, "model not found, switching");
                *self.model.write().await = discovered.clone();
                self.generate_with(&discovered, prompt).await
            }
            other => other,
        }
    }
}

/// Pulls the generated text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String, UpstreamError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
    let parts = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(UpstreamError::MissingField("candidates[0].content.parts[].text"));
    }
    Ok(text)
}
