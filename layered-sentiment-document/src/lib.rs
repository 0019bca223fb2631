//! Document-level review scoring for layered-sentiment.
//!
//! A review is scored from the root classes of its sentences; scores are
//! compared with gold labels to keep a running accuracy for the whole run.
//!
//! ## Core Types
//!
//! - [`ReviewChunk`] - One review parsed from raw text
//! - [`ReviewAggregator`] - Scores reviews in arrival order
//! - [`RunningStats`] - Hit/total counters
//! - [`ReviewResult`] - What gets reported per review
//!
//! ## Example
//!
//! ```
//! use layered_sentiment::SentimentClass;
//! use layered_sentiment_document::{parse_chunks, ReviewAggregator, ReviewScore};
//!
//! let chunks = parse_chunks("3\nA wonderful film.\n\n1\nDull.\n");
//! let mut aggregator = ReviewAggregator::new();
//!
//! let result = aggregator
//!     .review_chunk(&chunks[0], &[SentimentClass::VERY_POSITIVE])
//!     .unwrap();
//! assert_eq!(result.computed_score, ReviewScore::Positive);
//! assert_eq!(result.running_accuracy, 1.0);
//! ```

mod aggregate;
mod errors;
mod review;
mod stats;

pub use aggregate::{score, DocumentScore, ReviewAggregator, ReviewResult, ReviewScore};
pub use errors::{DocumentError, DocumentResult};
pub use review::{chunk_results, parse_chunks, ReviewChunk};
pub use stats::RunningStats;
