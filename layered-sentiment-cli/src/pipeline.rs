//! Shipped [`SentimentPipeline`] implementations.
//!
//! [`GoldLabelPipeline`] reads predictions straight off a sentiment
//! treebank's gold labels. [`CommandPipeline`] hands every request to an
//! external model program and reads back JSON:
//!
//! ```text
//! stdin:  {"text": "Great movie. Bad ending."}   or   {"tree": "(3 (2 Great) (2 movie))"}
//! stdout: {"sentences": [{"text": "...", "sentiment": "Positive", "tree": NODE}]}
//! NODE:   {"token": "movie"}
//!       | {"label": "NP", "class": 3, "probabilities": [...], "vector": [...], "children": [NODE, ...]}
//! ```

use crate::config::{CliConfig, PipelineCommand};
use layered_sentiment::{
    attach_gold_labels, Node, SentenceUnit, SentimentClass, SentimentError, SentimentPipeline,
    SentimentResult, Tree,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, Stdio};

/// Uses each node's gold label as its prediction. Only works on trees.
#[derive(Debug, Clone)]
pub struct GoldLabelPipeline {
    config: CliConfig,
}

impl GoldLabelPipeline {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl SentimentPipeline for GoldLabelPipeline {
    fn annotate_text(&self, _text: &str) -> SentimentResult<Vec<SentenceUnit>> {
        Err(SentimentError::Pipeline(
            "gold labels are only available for pre-parsed trees".to_string(),
        ))
    }

    fn annotate_tree(&self, unit: SentenceUnit) -> SentimentResult<SentenceUnit> {
        let tree = attach_gold_labels(&unit.tree);
        let sentiment = tree
            .predicted_class()
            .and_then(|class| self.config.class_name(class))
            .map(str::to_string);
        Ok(SentenceUnit {
            text: unit.text,
            tree,
            sentiment,
        })
    }
}

/// Runs an external program once per request.
#[derive(Debug, Clone)]
pub struct CommandPipeline {
    command: PipelineCommand,
    config: CliConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Request<'a> {
    Text(&'a str),
    Tree(String),
}

#[derive(Debug, Deserialize)]
struct WireDocument {
    sentences: Vec<WireSentence>,
}

#[derive(Debug, Deserialize)]
struct WireSentence {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
    tree: WireTree,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTree {
    Leaf {
        token: String,
    },
    Node {
        label: String,
        #[serde(default)]
        class: Option<i64>,
        #[serde(default)]
        probabilities: Option<Vec<f64>>,
        #[serde(default)]
        vector: Option<Vec<f64>>,
        #[serde(default)]
        children: Vec<WireTree>,
    },
}

impl CommandPipeline {
    pub fn new(command: PipelineCommand, config: &CliConfig) -> Self {
        Self {
            command,
            config: config.clone(),
        }
    }

    fn request(&self, request: &Request<'_>) -> SentimentResult<Vec<SentenceUnit>> {
        let payload = serde_json::to_vec(request).map_err(pipeline_error)?;

        tracing::debug!("spawning {} {:?}", self.command.command, self.command.args);
        let mut child = Command::new(&self.command.command)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                SentimentError::Pipeline(format!(
                    "failed to start {}: {}",
                    self.command.command, e
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A model that answers without reading its input closes the pipe early.
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(pipeline_error(e));
                }
            }
        }

        let output = child.wait_with_output().map_err(pipeline_error)?;
        if !output.status.success() {
            return Err(SentimentError::Pipeline(format!(
                "{} exited with {}",
                self.command.command, output.status
            )));
        }

        self.decode(&output.stdout)
    }

    fn decode(&self, stdout: &[u8]) -> SentimentResult<Vec<SentenceUnit>> {
        let document: WireDocument = serde_json::from_slice(stdout).map_err(pipeline_error)?;
        document
            .sentences
            .into_iter()
            .map(|sentence| {
                let tree = sentence.tree.into_tree()?;
                let sentiment = sentence.sentiment.or_else(|| {
                    tree.predicted_class()
                        .and_then(|class| self.config.class_name(class))
                        .map(str::to_string)
                });
                let text = sentence.text.unwrap_or_else(|| tree.yield_text());
                Ok(SentenceUnit {
                    text,
                    tree,
                    sentiment,
                })
            })
            .collect()
    }
}

impl SentimentPipeline for CommandPipeline {
    fn annotate_text(&self, text: &str) -> SentimentResult<Vec<SentenceUnit>> {
        self.request(&Request::Text(text))
    }

    fn annotate_tree(&self, unit: SentenceUnit) -> SentimentResult<SentenceUnit> {
        let mut sentences = self.request(&Request::Tree(unit.tree.to_string()))?;
        if sentences.len() != 1 {
            return Err(SentimentError::Pipeline(format!(
                "expected one annotated tree, got {}",
                sentences.len()
            )));
        }
        Ok(sentences.remove(0))
    }
}

impl WireTree {
    fn into_tree(self) -> SentimentResult<Tree> {
        match self {
            WireTree::Leaf { token } => Ok(Tree::Leaf(token)),
            WireTree::Node {
                label,
                class,
                probabilities,
                vector,
                children,
            } => {
                let predicted_class = class.map(SentimentClass::try_from).transpose()?;
                let children = children
                    .into_iter()
                    .map(WireTree::into_tree)
                    .collect::<SentimentResult<Vec<_>>>()?;
                Ok(Tree::Node(Node {
                    label,
                    predicted_class,
                    probabilities,
                    vector,
                    children,
                }))
            }
        }
    }
}

fn pipeline_error(err: impl std::fmt::Display) -> SentimentError {
    SentimentError::Pipeline(err.to_string())
}
