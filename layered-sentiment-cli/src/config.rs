//! TOML configuration for `sentiment-trees`.
//!
//! ```toml
//! output = "root,probabilities"
//! class_names = ["Very negative", "Negative", "Neutral", "Positive", "Very positive"]
//!
//! [pipeline]
//! command = "sentiment-model"
//! args = ["--json"]
//! ```

use anyhow::{bail, Context};
use layered_sentiment::{parse_output_modes, OutputMode, SentimentClass};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Loaded CLI configuration. Flags given on the command line win.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Comma-separated output modes used when `--output` is not given.
    pub output: Option<String>,
    /// Descriptive names of the sentiment classes, lowest class first.
    pub class_names: Vec<String>,
    /// External annotation program.
    pub pipeline: Option<PipelineCommand>,
}

/// Program spawned for every annotation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: None,
            class_names: ["Very negative", "Negative", "Neutral", "Positive", "Very positive"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            pipeline: None,
        }
    }
}

impl CliConfig {
    /// Load from a TOML file. No path, or a path that does not exist, gives
    /// the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) if path.exists() => path,
            Some(path) => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            None => return Ok(Self::default()),
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.class_names.len() != SentimentClass::COUNT {
            bail!(
                "class_names needs {} entries, found {}",
                SentimentClass::COUNT,
                config.class_names.len()
            );
        }
        Ok(config)
    }

    /// Output modes from the config file, or `ROOT` alone.
    pub fn output_modes(&self) -> anyhow::Result<Vec<OutputMode>> {
        match &self.output {
            Some(list) => Ok(parse_output_modes(list)?),
            None => Ok(vec![OutputMode::Root]),
        }
    }

    pub fn class_name(&self, class: SentimentClass) -> Option<&str> {
        self.class_names
            .get(class.value() as usize)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.class_name(SentimentClass::VERY_NEGATIVE), Some("Very negative"));
        assert_eq!(config.class_name(SentimentClass::POSITIVE), Some("Positive"));
        assert_eq!(config.output_modes().unwrap(), vec![OutputMode::Root]);
        assert!(config.pipeline.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
output = "penntrees, probabilities"

[pipeline]
command = "model"
args = ["--json"]
"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            config.output_modes().unwrap(),
            vec![OutputMode::PennTree, OutputMode::Probabilities]
        );
        let pipeline = config.pipeline.unwrap();
        assert_eq!(pipeline.command, "model");
        assert_eq!(pipeline.args, vec!["--json".to_string()]);
        assert_eq!(config.class_names.len(), 5);
    }

    #[test]
    fn test_wrong_number_of_class_names() {
        let err = CliConfig::from_toml(r#"class_names = ["bad", "good"]"#).unwrap_err();
        assert_eq!(err.to_string(), "class_names needs 5 entries, found 2");
    }

    #[test]
    fn test_unknown_output_mode_in_config() {
        let config = CliConfig::from_toml(r#"output = "root,colors""#).unwrap();
        assert!(config.output_modes().is_err());
    }
}
