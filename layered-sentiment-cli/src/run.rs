//! The three ways of driving a pipeline: scoring a review file, rendering a
//! treebank, and annotating sentences typed on stdin.
//!
//! Everything meant for the user goes to `out`; per-item failures are logged
//! and the run continues with the next item.

use layered_sentiment::{
    render, OutputMode, SentenceUnit, SentimentError, SentimentPipeline, SentimentResult,
};
use layered_sentiment_document::{
    parse_chunks, DocumentResult, ReviewAggregator, ReviewChunk, ReviewResult, RunningStats,
};
use std::io::{BufRead, Write};

/// Score every review chunk in `text` and print one report per review.
pub fn score_reviews<W: Write>(
    pipeline: &dyn SentimentPipeline,
    text: &str,
    out: &mut W,
) -> anyhow::Result<RunningStats> {
    let mut aggregator = ReviewAggregator::new();

    for chunk in parse_chunks(text) {
        match score_chunk(pipeline, &mut aggregator, &chunk) {
            Ok(result) => writeln!(out, "{}", result)?,
            Err(e) => {
                tracing::warn!("review {}: {}", chunk.position, e);
                writeln!(out, "{:.4}", aggregator.stats().accuracy())?;
            }
        }
        writeln!(out)?;
    }

    Ok(*aggregator.stats())
}

fn score_chunk(
    pipeline: &dyn SentimentPipeline,
    aggregator: &mut ReviewAggregator,
    chunk: &ReviewChunk,
) -> DocumentResult<ReviewResult> {
    let sentences = pipeline.annotate_text(&chunk.text)?;
    let classes = sentences
        .iter()
        .map(|unit| {
            unit.root_class().ok_or_else(|| SentimentError::InvalidTree {
                node_index: 0,
                label: unit.tree.label().to_string(),
            })
        })
        .collect::<SentimentResult<Vec<_>>>()?;
    aggregator.review_chunk(chunk, &classes)
}

/// Annotate and render pre-parsed sentences. Returns how many were printed.
pub fn render_units<W: Write>(
    pipeline: &dyn SentimentPipeline,
    units: Vec<SentenceUnit>,
    modes: &[OutputMode],
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut rendered = 0;
    for (idx, unit) in units.into_iter().enumerate() {
        let result = pipeline
            .annotate_tree(unit)
            .and_then(|unit| render(&unit, modes));
        match result {
            Ok(text) => {
                out.write_all(text.as_bytes())?;
                rendered += 1;
            }
            Err(e) => tracing::warn!("skipping tree {}: {}", idx + 1, e),
        }
    }
    Ok(rendered)
}

/// Annotate one sentence per input line until EOF. Blank lines are echoed.
pub fn annotate_lines<R: BufRead, W: Write>(
    pipeline: &dyn SentimentPipeline,
    input: R,
    modes: &[OutputMode],
    out: &mut W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            writeln!(out)?;
            continue;
        }

        match pipeline.annotate_text(line) {
            Ok(units) => {
                for unit in units {
                    match render(&unit, modes) {
                        Ok(text) => out.write_all(text.as_bytes())?,
                        Err(e) => tracing::warn!("skipping sentence {:?}: {}", unit.text, e),
                    }
                }
            }
            Err(e) => tracing::warn!("{}", e),
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::pipeline::GoldLabelPipeline;
    use layered_sentiment::{attach_gold_labels, parse_sentence_units, parse_tree};

    /// Splits text on '|' and reads each piece as a gold-labelled tree.
    struct TreeTextPipeline;

    impl SentimentPipeline for TreeTextPipeline {
        fn annotate_text(&self, text: &str) -> SentimentResult<Vec<SentenceUnit>> {
            text.split('|')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(|piece| {
                    let tree = attach_gold_labels(&parse_tree(piece)?);
                    Ok(SentenceUnit::from_tree(tree))
                })
                .collect()
        }

        fn annotate_tree(&self, unit: SentenceUnit) -> SentimentResult<SentenceUnit> {
            Ok(unit)
        }
    }

    fn run_reviews(text: &str) -> (String, RunningStats) {
        let mut out = Vec::new();
        let stats = score_reviews(&TreeTextPipeline, text, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_score_reviews() {
        let input = "3\n(4 (4 Great) (2 movie)) | (3 Loved it)\n\n2\n(0 (0 Awful))\n";
        let (out, stats) = run_reviews(input);
        insta::assert_snapshot!(out, @r###"
        prediction: 3 - real score: 3
        Review nr: 1
        (4 (4 Great) (2 movie)) | (3 Loved it)
        1.0000

        prediction: 1 - real score: 2
        Review nr: 2
        (0 (0 Awful))
        0.5000
        "###);
        assert_eq!(stats.total_reviews(), 2);
        assert_eq!(stats.successful_hits(), 1);
    }

    #[test]
    fn test_failed_review_still_reports_accuracy() {
        let input = "3\n(4 Great)\n\n2\n(S no class)\n";
        let (out, stats) = run_reviews(input);
        assert!(out.ends_with("Review nr: 1\n(4 Great)\n1.0000\n\n1.0000\n\n"));
        assert_eq!(stats.total_reviews(), 1);
    }

    #[test]
    fn test_render_units_skips_failures() {
        let units = parse_sentence_units("(3 (3 Good) (2 film)) (ROOT (NP cast)) (1 Meh)").unwrap();
        let pipeline = GoldLabelPipeline::new(&CliConfig::default());

        let mut out = Vec::new();
        let rendered = render_units(
            &pipeline,
            units,
            &[OutputMode::Root, OutputMode::PennTree],
            &mut out,
        )
        .unwrap();

        assert_eq!(rendered, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  Positive\n(3 (3 Good) (2 film))\n  Negative\n(1 Meh)\n"
        );
    }

    #[test]
    fn test_annotate_lines_echoes_blank_lines() {
        let input = "(3 Fine)\n\n   \n(0 Awful) | (4 Superb)\n";
        let mut out = Vec::new();
        annotate_lines(
            &TreeTextPipeline,
            input.as_bytes(),
            &[OutputMode::PennTree],
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "(3 Fine)\n\n\n(0 Awful)\n(4 Superb)\n"
        );
    }
}
