use super::{Node, Tree};
use crate::annotate::{index_postorder, PostorderIndex};
use crate::errors::{SentimentError, SentimentResult};
use std::fmt;

/// Bracketed rendering of a tree with substituted internal-node labels.
///
/// Labels come from a lookup keyed by node identity, so the borrowed tree is
/// rendered as if relabeled while its own labels stay untouched.
///
// (ROOT (NP (JJ Great) (NN movie)))   - original labels
// (3 (3 (3 Great) (2 movie)))         - predicted(..)
// (0 (1 (2 Great) (3 movie)))         - indexed(..)
pub struct PennDisplay<'a> {
    tree: &'a Tree,
    index: PostorderIndex<'a>,
    labels: Vec<String>,
}

impl<'a> PennDisplay<'a> {
    /// Label every internal node with its traversal index.
    pub fn indexed(tree: &'a Tree) -> Self {
        let index = index_postorder(tree);
        let labels = (0..index.len()).map(|i| i.to_string()).collect();
        PennDisplay {
            tree,
            index,
            labels,
        }
    }

    /// Label every internal node with its predicted class.
    pub fn predicted(tree: &'a Tree) -> SentimentResult<Self> {
        let index = index_postorder(tree);
        let labels = index
            .iter()
            .map(|(node_index, node)| {
                node.predicted_class
                    .map(|class| class.to_string())
                    .ok_or_else(|| SentimentError::InvalidTree {
                        node_index,
                        label: node.label.clone(),
                    })
            })
            .collect::<SentimentResult<Vec<_>>>()?;
        Ok(PennDisplay {
            tree,
            index,
            labels,
        })
    }

    fn label_of<'s>(&'s self, node: &'s Node) -> &'s str {
        match self.index.index_of(node) {
            Some(i) => &self.labels[i],
            None => &node.label,
        }
    }

    fn write_tree(&self, tree: &Tree, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match tree {
            Tree::Leaf(token) => f.write_str(token),
            Tree::Node(node) => {
                write!(f, "({}", self.label_of(node))?;
                for child in &node.children {
                    f.write_str(" ")?;
                    self.write_tree(child, f)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl<'a> fmt::Display for PennDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(self.tree, f)
    }
}
