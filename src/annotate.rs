//! Derived, presentational annotations over sentiment trees.
//!
//! Internal nodes are numbered by a single traversal: a node takes the
//! current counter value on entry, the counter is incremented, then the
//! children are visited in order. Leaves take no number and leave the
//! counter alone. Every index-bearing output (index labels, vector lines,
//! probability lines) goes through [`walk_internal_nodes`], so an index
//! printed in a tree always names the same node as the numeric line with
//! that index.

use crate::errors::{SentimentError, SentimentResult};
use crate::tree::{Node, Tree};
use std::collections::HashMap;
use std::convert::Infallible;

/// Visit internal nodes in traversal order, passing each node's index.
///
/// Returns the number of internal nodes visited.
pub fn walk_internal_nodes<'a, F>(tree: &'a Tree, mut visit: F) -> usize
where
    F: FnMut(usize, &'a Node),
{
    walk(tree, 0, &mut visit)
}

fn walk<'a, F>(tree: &'a Tree, index: usize, visit: &mut F) -> usize
where
    F: FnMut(usize, &'a Node),
{
    match tree {
        Tree::Leaf(_) => index,
        Tree::Node(node) => {
            visit(index, node);
            let mut index = index + 1;
            for child in &node.children {
                index = walk(child, index, visit);
            }
            index
        }
    }
}

/// Traversal indices of the internal nodes of one borrowed tree.
#[derive(Debug)]
pub struct PostorderIndex<'a> {
    nodes: Vec<&'a Node>,
    positions: HashMap<*const Node, usize>,
}

impl<'a> PostorderIndex<'a> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node holding index `index`.
    pub fn get(&self, index: usize) -> Option<&'a Node> {
        self.nodes.get(index).copied()
    }

    /// The index of `node`, if it belongs to the indexed tree.
    pub fn index_of(&self, node: &Node) -> Option<usize> {
        self.positions.get(&(node as *const Node)).copied()
    }

    /// Nodes paired with their index, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Node)> + '_ {
        self.nodes.iter().copied().enumerate()
    }
}

/// Number the internal nodes of `tree`.
pub fn index_postorder(tree: &Tree) -> PostorderIndex<'_> {
    let mut nodes = Vec::new();
    let mut positions = HashMap::new();
    walk_internal_nodes(tree, |index, node| {
        nodes.push(node);
        positions.insert(node as *const Node, index);
    });
    PostorderIndex { nodes, positions }
}

/// Deep copy of `tree` with every internal label replaced by the node's
/// predicted class. Leaves keep their tokens.
pub fn label_with_predicted_class(tree: &Tree) -> SentimentResult<Tree> {
    relabel(tree, 0, &mut |node_index, node| {
        node.predicted_class
            .map(|class| class.to_string())
            .ok_or_else(|| SentimentError::InvalidTree {
                node_index,
                label: node.label.clone(),
            })
    })
    .map(|(copy, _)| copy)
}

/// Deep copy of `tree` with every internal label replaced by its traversal index.
pub fn label_with_index(tree: &Tree) -> Tree {
    let relabeled: Result<(Tree, usize), Infallible> =
        relabel(tree, 0, &mut |node_index, _| Ok(node_index.to_string()));
    match relabeled {
        Ok((copy, _)) => copy,
        Err(never) => match never {},
    }
}

fn relabel<E, F>(tree: &Tree, index: usize, label: &mut F) -> Result<(Tree, usize), E>
where
    F: FnMut(usize, &Node) -> Result<String, E>,
{
    match tree {
        Tree::Leaf(token) => Ok((Tree::Leaf(token.clone()), index)),
        Tree::Node(node) => {
            let new_label = label(index, node)?;
            let mut next = index + 1;
            let mut children = Vec::with_capacity(node.children.len());
            for child in &node.children {
                let (copy, after) = relabel(child, next, label)?;
                children.push(copy);
                next = after;
            }
            let copy = Node {
                label: new_label,
                predicted_class: node.predicted_class,
                probabilities: node.probabilities.clone(),
                vector: node.vector.clone(),
                children,
            };
            Ok((Tree::Node(copy), next))
        }
    }
}
