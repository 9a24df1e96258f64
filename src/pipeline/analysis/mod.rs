pub mod types;
pub mod prompt;
pub mod sanitize;
pub mod parser;
pub mod validation;
pub mod analytics;
pub mod client;
pub mod orchestrator;

pub use types::*;
pub use prompt::*;
pub use sanitize::*;
pub use parser::*;
pub use validation::*;
pub use analytics::*;
pub use client::*;
pub use orchestrator::*;

use thiserror::Error;

/// Failures local to the model client. The orchestrator wraps every one of
/// these uniformly as `AnalysisError::Upstream`; the variants exist so logs
/// and callers that hold the source can tell a bad key from a flaky network.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model endpoint unreachable at {0}")]
    Connection(String),

    #[error("model request timed out after {0}s")]
    Timeout(u64),

    #[error("API key rejected by the model provider")]
    InvalidApiKey,

    #[error("rate limited by the model provider")]
    RateLimited,

    #[error("model API returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("malformed completion payload: {0}")]
    Payload(String),
}

/// The model returned well-transported but structurally invalid data. Always
/// fatal to the run; record-level variants carry the offending index so the
/// failure is actionable.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("no JSON payload found in model response: {0}")]
    MissingPayload(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("model response must be a JSON array")]
    NotAnArray,

    #[error("clause list entry at index {0} is not a string")]
    NonStringClause(usize),

    #[error("record at index {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("record at index {index} missing required fields: {}", .missing.join(", "))]
    MissingFields { index: usize, missing: Vec<String> },

    #[error("record at index {index}: '{field}' must be a number")]
    NonNumericField { index: usize, field: &'static str },

    #[error("record at index {index}: '{field}' must be a string")]
    NonStringField { index: usize, field: &'static str },
}

/// Error surface of one analysis run. The three run-failure kinds are never
/// conflated: callers branch on the variant, not on message text.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("contract text is empty")]
    EmptyContract,

    #[error("upstream model invocation failed during {stage}: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: ModelError,
    },

    #[error("model response validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("internal analytics fault: {0}")]
    Computation(String),
}
