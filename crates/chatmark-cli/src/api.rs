//! Client for the hosted generative-language endpoint
//!
//! One POST per user message, no streaming. The reply is the first
//! candidate's first text part; anything else degrades to a fallback
//! string rather than an error the UI would have to special-case.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Fallback reply when the endpoint answers without a usable candidate
const EMPTY_REPLY: &str = "No response from API";

/// Transcript text shown when the request itself fails
pub const FAILED_REPLY: &str = "Error: Unable to retrieve response.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Thin client over the generateContent endpoint
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
}

impl GenerativeClient {
    pub fn new(model: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            model,
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a reply to one user message
    pub async fn generate(&self, user_text: &str) -> Result<String, ApiError> {
        let url = format!(
            "{ENDPOINT_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: user_text.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, chars = user_text.len(), "sending generate request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        Ok(extract_reply(response))
    }
}

/// First candidate's first part, or the documented fallback
fn extract_reply(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}
