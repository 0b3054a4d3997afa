//! Gemini-backed [`Summarizer`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{DesignError, DesignResult};
use crate::summarize::{Summarizer, build_prompt};

/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Summarizer that calls the Gemini `generateContent` endpoint.
pub struct GeminiSummarizer {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl GeminiSummarizer {
    /// Build a summarizer with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> DesignResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DesignError::validation("Gemini API key is empty"));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DesignError::summarization(format!("build http client: {e}")))?;
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            client,
        })
    }

    /// Build a summarizer from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> DesignResult<Self> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| DesignError::validation(format!("{API_KEY_ENV} is not set")))?;
        Self::new(key)
    }

    /// Override the API base URL. Used by tests to point at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Summarizer for GeminiSummarizer {
    #[tracing::instrument(skip(self, text))]
    fn summarize(&self, text: &str) -> DesignResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(text),
                }],
            }],
        };
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .map_err(|e| DesignError::summarization(format!("request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DesignError::summarization(format!(
                "gemini returned {status}: {body}"
            )));
        }
        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| DesignError::summarization(format!("decode response: {e}")))?;
        let summary = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DesignError::summarization("gemini returned no text"))?;
        Ok(summary)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
#[path = "../../tests/unit/summarize/gemini.rs"]
mod tests;
