use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::ModelClient;
use super::ModelError;
use crate::config::ModelConfig;

/// Gemini HTTP client for the Google Generative Language API.
///
/// Synchronous by design: the pipeline blocks on each of its two model calls,
/// and the configured timeout is the only cancellation mechanism.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client from explicit configuration. The API key is held here
    /// and nowhere else; it is sent as a request header and never logged.
    pub fn new(config: &ModelConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Request body for models/<model>:generateContent
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Response body from models/<model>:generateContent
#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl ModelClient for GeminiClient {
    fn invoke(&self, prompt: &str, system: &str) -> Result<String, ModelError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            // Deterministic-as-possible output: analytics downstream must not
            // jitter between runs of the same contract.
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ModelError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ModelError::Timeout(self.timeout_secs)
                } else {
                    ModelError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => ModelError::InvalidApiKey,
                429 => ModelError::RateLimited,
                code => ModelError::Api { status: code, body },
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ModelError::Payload(e.to_string()))?;

        parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|parts| parts.into_iter().find_map(|p| p.text))
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ModelError::Payload("completion contained no text".into()))
    }
}

/// Mock model client for testing. Returns a fixed response for every call.
pub struct MockModelClient {
    response: String,
}

impl MockModelClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl ModelClient for MockModelClient {
    fn invoke(&self, _prompt: &str, _system: &str) -> Result<String, ModelError> {
        Ok(self.response.clone())
    }
}

/// Mock model client that plays back one response per call, in order.
/// Calls past the end of the script fail with a `ModelError`, which doubles
/// as a way to exercise upstream-failure paths at a chosen stage.
pub struct ScriptedModelClient {
    responses: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedModelClient {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, usable after the client is boxed.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl ModelClient for ScriptedModelClient {
    fn invoke(&self, _prompt: &str, _system: &str) -> Result<String, ModelError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(index)
            .cloned()
            .ok_or_else(|| ModelError::Payload(format!("scripted client exhausted at call {index}")))
    }
}
