//! Reading bracketed constituency trees.
//!
//! Accepts the usual treebank notation: `(label child ...)` where a child is
//! either another bracketed tree or a bare token. A node may omit its label
//! (`( (S ...))`), and any amount of whitespace, including newlines, may
//! separate trees and children. Sentiment treebanks use class values as
//! labels, `(3 (2 A) (4 (3 great) (2 film)))`; those are read back as gold
//! labels by [`attach_gold_labels`].
//!
//! Trees nested deeper than [`MAX_TREE_DEPTH`] are rejected as malformed.

use crate::errors::{SentimentError, SentimentResult};
use crate::sentence::SentenceUnit;
use crate::tree::{Node, Tree};
use std::fs;
use std::path::Path;

/// Deepest bracket nesting the reader accepts.
pub const MAX_TREE_DEPTH: usize = 1000;

/// Parse exactly one tree; anything but whitespace after it is an error.
pub fn parse_tree(input: &str) -> SentimentResult<Tree> {
    let mut reader = TreeReader::new(input);
    reader.skip_whitespace();
    let tree = reader.read_tree()?;
    reader.skip_whitespace();
    if let Some(ch) = reader.peek() {
        return Err(reader.error(format!("unexpected '{}' after tree", ch)));
    }
    Ok(tree)
}

/// Parse every tree in `input`.
pub fn parse_trees(input: &str) -> SentimentResult<Vec<Tree>> {
    let mut reader = TreeReader::new(input);
    let mut trees = Vec::new();
    loop {
        reader.skip_whitespace();
        if reader.peek().is_none() {
            return Ok(trees);
        }
        trees.push(reader.read_tree()?);
    }
}

/// One sentence unit per tree, with the leaf yield as its text.
pub fn parse_sentence_units(input: &str) -> SentimentResult<Vec<SentenceUnit>> {
    Ok(parse_trees(input)?
        .into_iter()
        .map(SentenceUnit::from_tree)
        .collect())
}

/// Read a treebank file, optionally dropping trees whose root label is not a
/// known sentiment class.
pub fn load_treebank(path: &Path, filter_unknown: bool) -> SentimentResult<Vec<SentenceUnit>> {
    let content = fs::read_to_string(path).map_err(|source| SentimentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let units = parse_sentence_units(&content)?;
    tracing::debug!("read {} trees from {}", units.len(), path.display());

    if filter_unknown {
        Ok(filter_unknown_roots(units))
    } else {
        Ok(units)
    }
}

/// Drop sentences whose root carries no gold sentiment label.
pub fn filter_unknown_roots(units: Vec<SentenceUnit>) -> Vec<SentenceUnit> {
    let before = units.len();
    let kept: Vec<SentenceUnit> = units
        .into_iter()
        .filter(|unit| unit.tree.as_node().and_then(Node::gold_class).is_some())
        .collect();
    if kept.len() < before {
        tracing::debug!("filtered {} trees with unknown roots", before - kept.len());
    }
    kept
}

/// Copy of `tree` whose gold-labelled nodes carry that label as their
/// predicted class, with a one-hot distribution. Other nodes are copied as is.
pub fn attach_gold_labels(tree: &Tree) -> Tree {
    match tree {
        Tree::Leaf(token) => Tree::Leaf(token.clone()),
        Tree::Node(node) => {
            let mut copy = Node {
                label: node.label.clone(),
                predicted_class: node.predicted_class,
                probabilities: node.probabilities.clone(),
                vector: node.vector.clone(),
                children: node.children.iter().map(attach_gold_labels).collect(),
            };
            if let Some(gold) = node.gold_class() {
                copy.predicted_class = Some(gold);
                copy.probabilities = Some(gold.one_hot());
            }
            Tree::Node(copy)
        }
    }
}

struct TreeReader<'s> {
    input: &'s str,
    pos: usize,
}

impl<'s> TreeReader<'s> {
    fn new(input: &'s str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn error(&self, message: String) -> SentimentError {
        SentimentError::MalformedTree {
            offset: self.pos,
            message,
        }
    }

    fn read_tree(&mut self) -> SentimentResult<Tree> {
        match self.peek() {
            Some('(') => self.read_node(1),
            Some(')') => Err(self.error("unbalanced ')'".to_string())),
            Some(_) => Err(self.error("expected '(' to open a tree".to_string())),
            None => Err(self.error("unexpected end of input".to_string())),
        }
    }

    fn read_node(&mut self, depth: usize) -> SentimentResult<Tree> {
        let open = self.pos;
        if depth > MAX_TREE_DEPTH {
            return Err(self.error(format!(
                "trees nested deeper than {} levels",
                MAX_TREE_DEPTH
            )));
        }
        self.bump();
        self.skip_whitespace();

        let label = match self.peek() {
            Some('(') | Some(')') => String::new(),
            Some(_) => self.read_token(),
            None => {
                return Err(SentimentError::MalformedTree {
                    offset: open,
                    message: "unclosed '('".to_string(),
                })
            }
        };

        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(')') => {
                    self.bump();
                    return Ok(Tree::node(label, children));
                }
                Some('(') => children.push(self.read_node(depth + 1)?),
                Some(_) => children.push(Tree::Leaf(self.read_token())),
                None => {
                    return Err(SentimentError::MalformedTree {
                        offset: open,
                        message: "unclosed '('".to_string(),
                    })
                }
            }
        }
    }

    fn read_token(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }
}
