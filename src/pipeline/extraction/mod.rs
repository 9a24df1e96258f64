pub mod text;

pub use text::*;

use thiserror::Error;

/// Failures while turning an uploaded document into plain text. These are the
/// collaborator's own errors and propagate to the caller unchanged; they never
/// enter the analysis error taxonomy.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("text encoding error: {0}")]
    EncodingError(String),

    #[error("document contains no text")]
    EmptyDocument,
}
