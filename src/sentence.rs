//! Sentence units and the external pipeline that annotates them.

use crate::errors::SentimentResult;
use crate::tree::{SentimentClass, Tree};

/// One sentence: its tree, its source text, and the root sentiment name
/// the pipeline assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceUnit {
    pub text: String,
    pub tree: Tree,
    /// Descriptive name of the root class, e.g. `"Negative"`.
    pub sentiment: Option<String>,
}

impl SentenceUnit {
    pub fn new(text: impl Into<String>, tree: Tree) -> Self {
        Self {
            text: text.into(),
            tree,
            sentiment: None,
        }
    }

    /// Wrap an already-built tree; its leaf yield becomes the text.
    pub fn from_tree(tree: Tree) -> Self {
        let text = tree.yield_text();
        Self::new(text, tree)
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    /// Predicted class of the sentence's root node.
    pub fn root_class(&self) -> Option<SentimentClass> {
        self.tree.predicted_class()
    }
}

/// The parse + sentiment model that attaches predictions to trees.
///
/// Implementations live outside this crate; they own tokenization,
/// sentence splitting, parsing and inference.
pub trait SentimentPipeline {
    /// Split `text` into sentences and annotate each one.
    fn annotate_text(&self, text: &str) -> SentimentResult<Vec<SentenceUnit>>;

    /// Annotate a sentence whose tree is already built.
    fn annotate_tree(&self, unit: SentenceUnit) -> SentimentResult<SentenceUnit>;
}
