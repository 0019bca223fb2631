//! Textual renderings of annotated sentences.

use crate::annotate::walk_internal_nodes;
use crate::errors::{SentimentError, SentimentResult};
use crate::sentence::SentenceUnit;
use crate::tree::{Node, PennDisplay, Tree};
use std::fmt;
use std::str::FromStr;

/// One way of printing an annotated sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Bracketed tree labelled with predicted classes.
    PennTree,
    /// Index-labelled tree followed by each node's embedding vector.
    Vectors,
    /// The sentence's root sentiment name.
    Root,
    /// Index-labelled tree followed by each node's class distribution.
    Probabilities,
}

impl OutputMode {
    pub const ALL: [OutputMode; 4] = [
        OutputMode::PennTree,
        OutputMode::Vectors,
        OutputMode::Root,
        OutputMode::Probabilities,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputMode::PennTree => "PENNTREES",
            OutputMode::Vectors => "VECTORS",
            OutputMode::Root => "ROOT",
            OutputMode::Probabilities => "PROBABILITIES",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = SentimentError;

    fn from_str(s: &str) -> SentimentResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENNTREES" | "PENNTREE" | "PENN_TREE" | "PENN_TREES" => Ok(OutputMode::PennTree),
            "VECTORS" => Ok(OutputMode::Vectors),
            "ROOT" => Ok(OutputMode::Root),
            "PROBABILITIES" => Ok(OutputMode::Probabilities),
            _ => Err(SentimentError::UnsupportedOutputMode(s.trim().to_string())),
        }
    }
}

/// Parse a comma-separated list of output modes, e.g. `"root,pennTrees"`.
pub fn parse_output_modes(list: &str) -> SentimentResult<Vec<OutputMode>> {
    list.split(',').map(str::parse).collect()
}

/// Render `unit` once per mode, in order. Each block ends with a newline.
///
/// Nothing is returned for a sentence if any mode fails.
pub fn render(unit: &SentenceUnit, modes: &[OutputMode]) -> SentimentResult<String> {
    let mut out = String::new();
    for &mode in modes {
        write_mode(&mut out, unit, mode)?;
    }
    Ok(out)
}

/// Render a single mode.
pub fn render_mode(unit: &SentenceUnit, mode: OutputMode) -> SentimentResult<String> {
    render(unit, &[mode])
}

fn write_mode(out: &mut String, unit: &SentenceUnit, mode: OutputMode) -> SentimentResult<()> {
    match mode {
        OutputMode::PennTree => {
            let display = PennDisplay::predicted(&unit.tree)?;
            out.push_str(&format!("{}\n", display));
            Ok(())
        }
        OutputMode::Vectors => {
            write_node_values(out, &unit.tree, mode, |node| node.vector.as_deref())
        }
        OutputMode::Probabilities => {
            write_node_values(out, &unit.tree, mode, |node| node.probabilities.as_deref())
        }
        OutputMode::Root => {
            let sentiment = unit
                .sentiment
                .as_deref()
                .ok_or(SentimentError::MissingAnnotation {
                    mode,
                    node_index: 0,
                })?;
            out.push_str(&format!("  {}\n", sentiment));
            Ok(())
        }
    }
}

// (0 (1 Great) (2 movie))
//   0:  0.0100  0.0200  0.1000  0.6000  0.2700
//   1:  ...
fn write_node_values<'a, F>(
    out: &mut String,
    tree: &'a Tree,
    mode: OutputMode,
    values: F,
) -> SentimentResult<()>
where
    F: Fn(&'a Node) -> Option<&'a [f64]>,
{
    out.push_str(&format!("{}\n", PennDisplay::indexed(tree)));

    let mut missing = None;
    walk_internal_nodes(tree, |index, node| {
        if missing.is_some() {
            return;
        }
        match values(node) {
            Some(values) => {
                out.push_str(&format!("  {}:", index));
                for value in values {
                    out.push_str(&format!("  {:.4}", value));
                }
                out.push('\n');
            }
            None => missing = Some(index),
        }
    });

    match missing {
        Some(node_index) => Err(SentimentError::MissingAnnotation { mode, node_index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SentimentClass;
    use proptest::prelude::*;

    fn unit() -> SentenceUnit {
        let tree: Tree = Node::new(
            "ROOT",
            vec![
                Node::new("JJ", vec![Tree::leaf("Great")])
                    .with_class(SentimentClass::POSITIVE)
                    .with_probabilities(vec![0.01, 0.02, 0.1, 0.6, 0.27])
                    .with_vector(vec![0.5, -0.25])
                    .into(),
                Node::new("NN", vec![Tree::leaf("movie")])
                    .with_class(SentimentClass::NEUTRAL)
                    .with_probabilities(vec![0.0, 0.1, 0.8, 0.1, 0.0])
                    .with_vector(vec![-1.0, 0.125])
                    .into(),
            ],
        )
        .with_class(SentimentClass::VERY_POSITIVE)
        .with_probabilities(vec![0.0, 0.0, 0.05, 0.25, 0.7])
        .with_vector(vec![0.0, 2.0])
        .into();
        SentenceUnit::from_tree(tree).with_sentiment("Very positive")
    }

    #[test]
    fn test_parse_modes_case_insensitive() {
        let modes = parse_output_modes("pennTrees,VECTORS, root ,Probabilities").unwrap();
        assert_eq!(modes, OutputMode::ALL.to_vec());
        assert_eq!("penn_tree".parse::<OutputMode>().unwrap(), OutputMode::PennTree);
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = parse_output_modes("root,json").unwrap_err();
        assert!(matches!(err, SentimentError::UnsupportedOutputMode(ref token) if token == "json"));
    }

    #[test]
    fn test_render_penn_tree() {
        let output = render_mode(&unit(), OutputMode::PennTree).unwrap();
        assert_eq!(output, "(4 (3 Great) (2 movie))\n");
    }

    #[test]
    fn test_render_vectors() {
        let output = render_mode(&unit(), OutputMode::Vectors).unwrap();
        insta::assert_snapshot!(output, @r###"
        (0 (1 Great) (2 movie))
          0:  0.0000  2.0000
          1:  0.5000  -0.2500
          2:  -1.0000  0.1250
        "###);
    }

    #[test]
    fn test_render_probabilities() {
        let output = render_mode(&unit(), OutputMode::Probabilities).unwrap();
        insta::assert_snapshot!(output, @r###"
        (0 (1 Great) (2 movie))
          0:  0.0000  0.0000  0.0500  0.2500  0.7000
          1:  0.0100  0.0200  0.1000  0.6000  0.2700
          2:  0.0000  0.1000  0.8000  0.1000  0.0000
        "###);
    }

    #[test]
    fn test_render_root() {
        let output = render_mode(&unit(), OutputMode::Root).unwrap();
        assert_eq!(output, "  Very positive\n");
    }

    #[test]
    fn test_modes_concatenate_in_order() {
        let output = render(&unit(), &[OutputMode::Root, OutputMode::PennTree]).unwrap();
        assert_eq!(output, "  Very positive\n(4 (3 Great) (2 movie))\n");
        assert_eq!(render(&unit(), &[]).unwrap(), "");
    }

    #[test]
    fn test_one_numeric_line_per_internal_node() {
        let unit = unit();
        let output = render_mode(&unit, OutputMode::Probabilities).unwrap();
        let numeric: Vec<&str> = output.lines().skip(1).collect();
        assert_eq!(numeric.len(), unit.tree.internal_node_count());
        for line in numeric {
            for value in line.split_whitespace().skip(1) {
                let decimals = value.split('.').nth(1).unwrap();
                assert_eq!(decimals.len(), 4);
            }
        }
    }

    #[test]
    fn test_missing_vector_names_node() {
        let mut unit = unit();
        if let Tree::Node(root) = &mut unit.tree {
            if let Tree::Node(noun) = &mut root.children[1] {
                noun.vector = None;
            }
        }
        let err = render_mode(&unit, OutputMode::Vectors).unwrap_err();
        assert!(matches!(
            err,
            SentimentError::MissingAnnotation { mode: OutputMode::Vectors, node_index: 2 }
        ));
        // probabilities are still complete
        assert!(render_mode(&unit, OutputMode::Probabilities).is_ok());
    }

    #[test]
    fn test_root_without_sentiment() {
        let mut unit = unit();
        unit.sentiment = None;
        let err = render(&unit, &[OutputMode::PennTree, OutputMode::Root]).unwrap_err();
        assert!(matches!(err, SentimentError::MissingAnnotation { mode: OutputMode::Root, .. }));
    }

    #[test]
    fn test_render_does_not_touch_tree() {
        let unit = unit();
        let before = unit.clone();
        render(&unit, &OutputMode::ALL).unwrap();
        assert_eq!(unit, before);
    }

    fn arb_annotated_tree() -> impl Strategy<Value = Tree> {
        let leaf = "[a-z]{1,6}".prop_map(Tree::Leaf);
        leaf.prop_recursive(5, 48, 4, |inner| {
            (
                "[A-Z]{1,3}",
                prop::collection::vec(0.0f64..1.0, SentimentClass::COUNT),
                prop::collection::vec(-10.0f64..10.0, 1..6),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(label, probabilities, vector, children)| {
                    Tree::from(
                        Node::new(label, children)
                            .with_probabilities(probabilities)
                            .with_vector(vector),
                    )
                })
        })
    }

    proptest! {
        #[test]
        fn property_numeric_lines_match_internal_nodes(tree in arb_annotated_tree()) {
            let unit = SentenceUnit::from_tree(tree);
            for mode in [OutputMode::Vectors, OutputMode::Probabilities] {
                let output = render_mode(&unit, mode).unwrap();
                let mut lines = output.lines();
                let indexed = PennDisplay::indexed(&unit.tree).to_string();
                prop_assert_eq!(lines.next(), Some(indexed.as_str()));

                let numeric: Vec<&str> = lines.collect();
                prop_assert_eq!(numeric.len(), unit.tree.internal_node_count());
                for (index, line) in numeric.iter().enumerate() {
                    let marker = format!("{}:", index);
                    let mut fields = line.split_whitespace();
                    prop_assert_eq!(fields.next(), Some(marker.as_str()));
                    for value in fields {
                        prop_assert_eq!(value.split('.').nth(1).map(str::len), Some(4));
                    }
                }
            }
        }
    }
}
