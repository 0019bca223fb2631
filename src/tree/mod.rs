//! Constituency trees carrying per-node sentiment predictions.
//!
//! Annotations are attached by an external model and are only ever read
//! here. Derived views (index labels, predicted-class labels) are produced
//! by [`crate::annotate`] and [`display::PennDisplay`] without touching the
//! tree they were derived from.

mod display;

pub use display::PennDisplay;

use crate::errors::{SentimentError, SentimentResult};
use std::fmt;

/// Signed aggregation weight of each class, indexed by class value.
const CLASS_WEIGHTS: [i32; SentimentClass::COUNT] = [-2, -1, 0, 1, 2];

/// A discrete sentiment category, from very negative (0) to very positive (4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SentimentClass(u8);

impl SentimentClass {
    /// Number of sentiment classes.
    pub const COUNT: usize = 5;

    pub const VERY_NEGATIVE: Self = Self(0);
    pub const NEGATIVE: Self = Self(1);
    pub const NEUTRAL: Self = Self(2);
    pub const POSITIVE: Self = Self(3);
    pub const VERY_POSITIVE: Self = Self(4);

    /// Returns `None` for values outside `0..=4`.
    pub fn new(value: u8) -> Option<Self> {
        if (value as usize) < Self::COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Interpret a node label as a gold sentiment class (`"0"` ..= `"4"`).
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Signed weight used when averaging sentence classes into a document score.
    pub fn weight(self) -> i32 {
        CLASS_WEIGHTS[self.0 as usize]
    }

    /// Probability distribution putting all mass on this class.
    pub fn one_hot(self) -> Vec<f64> {
        (0..Self::COUNT)
            .map(|class| if class == self.0 as usize { 1.0 } else { 0.0 })
            .collect()
    }

    /// All classes in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<i64> for SentimentClass {
    type Error = SentimentError;

    fn try_from(value: i64) -> SentimentResult<Self> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(SentimentError::ClassOutOfRange(value))
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, rooted, n-ary constituency tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// A token.
    Leaf(String),
    /// A phrase node owning its children.
    Node(Node),
}

/// An internal node and the annotations the external model attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub predicted_class: Option<SentimentClass>,
    /// Class distribution, one entry per [`SentimentClass`].
    pub probabilities: Option<Vec<f64>>,
    /// Hidden-state embedding of the node.
    pub vector: Option<Vec<f64>>,
    pub children: Vec<Tree>,
}

impl Node {
    /// Create an unannotated node.
    pub fn new(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Self {
            label: label.into(),
            predicted_class: None,
            probabilities: None,
            vector: None,
            children,
        }
    }

    pub fn with_class(mut self, class: SentimentClass) -> Self {
        self.predicted_class = Some(class);
        self
    }

    pub fn with_probabilities(mut self, probabilities: Vec<f64>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    pub fn with_vector(mut self, vector: Vec<f64>) -> Self {
        self.vector = Some(vector);
        self
    }

    /// The gold label of a treebank node, if its label is a class value.
    pub fn gold_class(&self) -> Option<SentimentClass> {
        SentimentClass::from_label(&self.label)
    }
}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Tree::Node(node)
    }
}

impl Tree {
    pub fn leaf(token: impl Into<String>) -> Self {
        Tree::Leaf(token.into())
    }

    /// Create an unannotated internal node.
    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree::Node(Node::new(label, children))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Tree::Node(node) => Some(node),
            Tree::Leaf(_) => None,
        }
    }

    /// The node label, or the token for a leaf.
    pub fn label(&self) -> &str {
        match self {
            Tree::Leaf(token) => token,
            Tree::Node(node) => &node.label,
        }
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node(node) => &node.children,
        }
    }

    /// Predicted class of the root node.
    pub fn predicted_class(&self) -> Option<SentimentClass> {
        self.as_node().and_then(|node| node.predicted_class)
    }

    /// Leaf tokens in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }

    /// The sentence the tree spans: its leaves joined by single spaces.
    pub fn yield_text(&self) -> String {
        self.leaves().join(" ")
    }

    pub fn internal_node_count(&self) -> usize {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Node(node) => {
                1 + node
                    .children
                    .iter()
                    .map(Tree::internal_node_count)
                    .sum::<usize>()
            }
        }
    }
}

fn collect_leaves<'a>(tree: &'a Tree, leaves: &mut Vec<&'a str>) {
    match tree {
        Tree::Leaf(token) => leaves.push(token),
        Tree::Node(node) => {
            for child in &node.children {
                collect_leaves(child, leaves);
            }
        }
    }
}

/// Bracketed notation with the labels the tree actually carries.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Leaf(token) => f.write_str(token),
            Tree::Node(node) => {
                write!(f, "({}", node.label)?;
                for child in &node.children {
                    write!(f, " {}", child)?;
                }
                f.write_str(")")
            }
        }
    }
}
