#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Rendering of sentiment-annotated constituency trees.
//!
//! Trees arrive with a predicted class, a class distribution and a hidden
//! vector on every internal node, attached by an external parse + sentiment
//! model (see [`SentimentPipeline`]). This crate only reads those
//! annotations: it numbers nodes, derives label views and prints them.
//!
//! ## Modules
//!
//! - [`tree`] - Tree model and bracketed display
//! - [`annotate`] - Node numbering and relabeled copies
//! - [`render`] - Output modes and sentence rendering
//! - [`treebank`] - Bracketed treebank reader and gold labels
//! - [`sentence`] - Sentence units and the pipeline interface
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use layered_sentiment::{attach_gold_labels, parse_tree, render, OutputMode, SentenceUnit};
//!
//! let tree = attach_gold_labels(&parse_tree("(3 (2 A) (4 (3 great) (2 film)))").unwrap());
//! let unit = SentenceUnit::from_tree(tree).with_sentiment("Positive");
//!
//! let text = render(&unit, &[OutputMode::Root, OutputMode::PennTree]).unwrap();
//! assert_eq!(text, "  Positive\n(3 (2 A) (4 (3 great) (2 film)))\n");
//! ```

pub mod annotate;
pub mod errors;
pub mod render;
pub mod sentence;
pub mod tree;
pub mod treebank;

pub use annotate::{
    index_postorder, label_with_index, label_with_predicted_class, walk_internal_nodes,
    PostorderIndex,
};
pub use errors::{SentimentError, SentimentResult};
pub use render::{parse_output_modes, render, render_mode, OutputMode};
pub use sentence::{SentenceUnit, SentimentPipeline};
pub use tree::{Node, PennDisplay, SentimentClass, Tree};
pub use treebank::{
    attach_gold_labels, filter_unknown_roots, load_treebank, parse_sentence_units, parse_tree,
    parse_trees, MAX_TREE_DEPTH,
};
