//! sentiment-trees - render sentiment-annotated trees and score reviews
//!
//! - `--file reviews.txt` scores every review in the file and reports the
//!   running accuracy against the gold scores
//! - `--file trees.txt --input trees` renders every tree of a sentiment
//!   treebank
//! - `--stdin` annotates one sentence per line until EOF

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use layered_sentiment::{load_treebank, OutputMode, SentimentPipeline, SentimentResult};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod pipeline;
mod run;

use config::CliConfig;
use pipeline::{CommandPipeline, GoldLabelPipeline};

/// Kind of input read from `--file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Review chunks: a gold score line, then the review text
    Text,
    /// Bracketed sentiment trees
    Trees,
}

#[derive(Parser, Debug)]
#[command(name = "sentiment-trees")]
#[command(about = "Render sentiment-annotated constituency trees and score reviews", long_about = None)]
#[command(version)]
struct Cli {
    /// File to process
    #[arg(long, conflicts_with = "stdin", required_unless_present = "stdin")]
    file: Option<PathBuf>,

    /// Read one sentence per line from stdin
    #[arg(long)]
    stdin: bool,

    /// Format of the input file
    #[arg(long, value_enum, ignore_case = true, default_value_t = InputFormat::Text)]
    input: InputFormat,

    /// Drop trees whose root has no sentiment label (trees input only)
    #[arg(long)]
    filter_unknown: bool,

    /// Comma-separated output modes: penntrees, vectors, root, probabilities
    #[arg(long, value_delimiter = ',', value_parser = parse_output_mode)]
    output: Vec<OutputMode>,

    /// Configuration file path
    #[arg(short, long, env = "SENTIMENT_TREES_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_output_mode(value: &str) -> SentimentResult<OutputMode> {
    value.parse()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .init();

    if cli.filter_unknown && cli.input != InputFormat::Trees {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--filter-unknown only applies to --input trees",
            )
            .exit();
    }
    if cli.stdin && cli.input == InputFormat::Trees {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "trees cannot be read from stdin; use --file",
            )
            .exit();
    }

    let config = CliConfig::load(cli.config.as_deref())?;
    let modes = if cli.output.is_empty() {
        config
            .output_modes()
            .unwrap_or_else(|e| Cli::command().error(ErrorKind::InvalidValue, e).exit())
    } else {
        cli.output.clone()
    };
    let pipeline = build_pipeline(&config, cli.input)
        .unwrap_or_else(|e| Cli::command().error(ErrorKind::MissingRequiredArgument, e).exit());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (cli.file, cli.input) {
        (Some(path), InputFormat::Text) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let stats = run::score_reviews(pipeline.as_ref(), &text, &mut out)?;
            tracing::info!(
                "scored {} reviews, accuracy {:.4}",
                stats.total_reviews(),
                stats.accuracy()
            );
        }
        (Some(path), InputFormat::Trees) => {
            let units = load_treebank(&path, cli.filter_unknown)?;
            let total = units.len();
            let rendered = run::render_units(pipeline.as_ref(), units, &modes, &mut out)?;
            tracing::debug!("rendered {} of {} trees", rendered, total);
        }
        (None, _) => {
            eprintln!("Reading in text from stdin.");
            eprintln!("Please enter one sentence per line.");
            eprintln!("Processing will end when EOF is reached.");
            run::annotate_lines(pipeline.as_ref(), io::stdin().lock(), &modes, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Raw text always goes through the configured model; trees fall back to
/// their gold labels when no model is configured.
fn build_pipeline(
    config: &CliConfig,
    input: InputFormat,
) -> anyhow::Result<Box<dyn SentimentPipeline>> {
    match (&config.pipeline, input) {
        (Some(command), _) => Ok(Box::new(CommandPipeline::new(command.clone(), config))),
        (None, InputFormat::Trees) => Ok(Box::new(GoldLabelPipeline::new(config))),
        (None, InputFormat::Text) => anyhow::bail!(
            "text input needs a [pipeline] command in the config file (see --config)"
        ),
    }
}
