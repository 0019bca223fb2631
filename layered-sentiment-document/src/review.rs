//! Raw-text review chunks.
//!
//! A review file is a sequence of chunks separated by blank lines. The first
//! line of a chunk is the integer gold score, the second line is the review
//! text:
//!
//! ```text
//! 2
//! Great movie
//!
//! 1
//! Terrible film
//! ```
//!
//! Only the second line is used as review text; any further lines in the
//! chunk are ignored.

use crate::errors::{DocumentError, DocumentResult};
use once_cell::sync::Lazy;
use regex::Regex;

static CHUNK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n+").expect("Invalid chunk separator regex"));

/// One review: its gold score and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewChunk {
    /// 1-based position of the chunk among the non-blank chunks of the input.
    pub position: usize,
    pub gold_score: i64,
    pub text: String,
}

/// Parse every chunk, keeping the error of each malformed one.
pub fn chunk_results(text: &str) -> Vec<DocumentResult<ReviewChunk>> {
    CHUNK_SEPARATOR
        .split(text)
        .filter(|chunk| !chunk.trim().is_empty())
        .enumerate()
        .map(|(idx, chunk)| parse_chunk(chunk, idx + 1))
        .collect()
}

/// Parse the well-formed chunks of `text`; malformed chunks are logged and
/// skipped.
pub fn parse_chunks(text: &str) -> Vec<ReviewChunk> {
    chunk_results(text)
        .into_iter()
        .filter_map(|result| match result {
            Ok(chunk) => Some(chunk),
            Err(e) => {
                tracing::warn!("skipping review: {}", e);
                None
            }
        })
        .collect()
}

fn parse_chunk(chunk: &str, position: usize) -> DocumentResult<ReviewChunk> {
    let mut lines = chunk.trim().lines();

    let score_line = lines.next().unwrap_or_default().trim();
    let gold_score = score_line
        .parse::<i64>()
        .map_err(|_| DocumentError::MalformedChunk {
            position,
            reason: format!("expected an integer score, found {:?}", score_line),
        })?;

    let text = lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| DocumentError::MalformedChunk {
            position,
            reason: "missing review text line".to_string(),
        })?;

    Ok(ReviewChunk {
        position,
        gold_score,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_chunks() {
        let chunks = parse_chunks("2\nGreat movie\n\n1\nTerrible film\n");
        assert_eq!(
            chunks,
            vec![
                ReviewChunk {
                    position: 1,
                    gold_score: 2,
                    text: "Great movie".to_string(),
                },
                ReviewChunk {
                    position: 2,
                    gold_score: 1,
                    text: "Terrible film".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_blank_line_runs_and_whitespace() {
        let input = "\n\n3\nLoved it.\n  \n\t\n\n2\r\nIt was fine.\r\n\n\n";
        let chunks = parse_chunks(input);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].gold_score, 3);
        assert_eq!(chunks[1].gold_score, 2);
        assert_eq!(chunks[1].text, "It was fine.");
    }

    #[test]
    fn test_extra_lines_are_ignored() {
        let chunks = parse_chunks("3\nFirst line.\nSecond line.\n");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "First line.");
    }

    #[test]
    fn test_malformed_chunks_are_skipped() {
        let input = "x\nNo score here\n\n2\n\n1\nStill counted\n";
        let results = chunk_results(input);
        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[0],
            Err(DocumentError::MalformedChunk { position: 1, .. })
        ));
        assert!(matches!(
            results[1],
            Err(DocumentError::MalformedChunk { position: 2, .. })
        ));

        let chunks = parse_chunks(input);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].position, 3);
        assert_eq!(chunks[0].text, "Still counted");
    }

    #[test]
    fn test_malformed_chunk_message() {
        let err = chunk_results("abc\ntext").remove(0).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r###"malformed chunk 1: expected an integer score, found "abc""###);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_chunks("").is_empty());
        assert!(parse_chunks("\n \n\n").is_empty());
    }
}
