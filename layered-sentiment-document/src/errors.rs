//! Error types for review scoring.

use layered_sentiment::SentimentError;
use thiserror::Error;

/// Errors that can occur while reading or scoring one review.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A chunk that does not follow the score-line / text-line grammar.
    #[error("malformed chunk {position}: {reason}")]
    MalformedChunk { position: usize, reason: String },

    /// A review without any sentence to score.
    #[error("document has no sentences to score")]
    EmptyDocument,

    /// Annotating or reading one of the review's sentences failed.
    #[error(transparent)]
    Sentence(#[from] SentimentError),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
