//! Error types for tree annotation and rendering.

use crate::render::OutputMode;
use thiserror::Error;

/// Errors that can occur while reading, annotating or rendering trees.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// An internal node has no predicted sentiment class.
    #[error("invalid tree: node {node_index} ({label:?}) carries no predicted class")]
    InvalidTree { node_index: usize, label: String },

    /// An output mode token that is not one of the known modes.
    #[error("unsupported output mode: {0:?}")]
    UnsupportedOutputMode(String),

    /// A node lacks the data needed by the active output mode.
    #[error("missing annotation for {mode} output at node {node_index}")]
    MissingAnnotation { mode: OutputMode, node_index: usize },

    /// A class value outside `0..=4`.
    #[error("sentiment class out of range: {0}")]
    ClassOutOfRange(i64),

    /// Bracketed tree text that does not parse.
    #[error("malformed tree at byte {offset}: {message}")]
    MalformedTree { offset: usize, message: String },

    /// The external parse/sentiment pipeline failed.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Reading a treebank failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for tree operations.
pub type SentimentResult<T> = Result<T, SentimentError>;
