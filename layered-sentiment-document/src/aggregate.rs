//! Document-level scores from per-sentence sentiment classes.
//!
//! Each sentence class is weighted `{0: -2, 1: -1, 2: 0, 3: 1, 4: 2}` and
//! the weights are averaged over the sentences of the review. The average is
//! mapped onto a three-way score:
//!
//! ```text
//! avg <= -0.5          -> 1 (negative)
//! -0.5 < avg < 0.5     -> 2 (neutral)
//! avg >= 0.5           -> 3 (positive)
//! ```

use crate::errors::{DocumentError, DocumentResult};
use crate::review::ReviewChunk;
use crate::stats::RunningStats;
use layered_sentiment::SentimentClass;
use std::fmt;

/// Three-way document score, on the same scale as the gold labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewScore {
    Negative = 1,
    Neutral = 2,
    Positive = 3,
}

impl ReviewScore {
    /// Map an average sentence weight onto a document score.
    pub fn from_average(avg_weighted: f64) -> Self {
        if avg_weighted <= -0.5 {
            ReviewScore::Negative
        } else if avg_weighted < 0.5 {
            ReviewScore::Neutral
        } else {
            ReviewScore::Positive
        }
    }

    pub fn value(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for ReviewScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The score of one document and the average it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentScore {
    pub score: ReviewScore,
    pub avg_weighted: f64,
    pub sentence_count: usize,
}

/// Score a document from the predicted classes of its sentences.
pub fn score(sentence_classes: &[SentimentClass]) -> DocumentResult<DocumentScore> {
    if sentence_classes.is_empty() {
        return Err(DocumentError::EmptyDocument);
    }

    let mut counts = [0usize; SentimentClass::COUNT];
    for class in sentence_classes {
        counts[class.value() as usize] += 1;
    }

    let weighted_sum: i64 = SentimentClass::all()
        .map(|class| class.weight() as i64 * counts[class.value() as usize] as i64)
        .sum();
    let avg_weighted = weighted_sum as f64 / sentence_classes.len() as f64;

    Ok(DocumentScore {
        score: ReviewScore::from_average(avg_weighted),
        avg_weighted,
        sentence_count: sentence_classes.len(),
    })
}

/// Outcome of scoring one review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    /// 1-based number of the review in arrival order.
    pub document_index: usize,
    pub gold_score: Option<i64>,
    pub computed_score: ReviewScore,
    pub avg_weighted: f64,
    /// Accuracy over all tracked reviews, this one included.
    pub running_accuracy: f64,
    pub text: String,
}

// prediction: 3 - real score: 2
// Review nr: 1
// Great movie
// 0.0000
impl fmt::Display for ReviewResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gold_score {
            Some(gold) => writeln!(
                f,
                "prediction: {} - real score: {}",
                self.computed_score, gold
            )?,
            None => writeln!(f, "prediction: {} - real score: n/a", self.computed_score)?,
        }
        writeln!(f, "Review nr: {}", self.document_index)?;
        writeln!(f, "{}", self.text)?;
        write!(f, "{:.4}", self.running_accuracy)
    }
}

/// Scores reviews one after another and keeps the run's accuracy.
#[derive(Debug, Default)]
pub struct ReviewAggregator {
    stats: RunningStats,
    documents: usize,
}

impl ReviewAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one review. Accuracy is only tracked when a gold score is known;
    /// a review that fails to score leaves the accuracy untouched but still
    /// takes its document number.
    pub fn review(
        &mut self,
        text: &str,
        gold_score: Option<i64>,
        sentence_classes: &[SentimentClass],
    ) -> DocumentResult<ReviewResult> {
        self.documents += 1;
        let document = score(sentence_classes)?;

        let running_accuracy = match gold_score {
            Some(gold) => self.stats.track(document.score, gold),
            None => self.stats.accuracy(),
        };

        Ok(ReviewResult {
            document_index: self.documents,
            gold_score,
            computed_score: document.score,
            avg_weighted: document.avg_weighted,
            running_accuracy,
            text: text.to_string(),
        })
    }

    /// Score a parsed review chunk against its gold score.
    pub fn review_chunk(
        &mut self,
        chunk: &ReviewChunk,
        sentence_classes: &[SentimentClass],
    ) -> DocumentResult<ReviewResult> {
        self.review(&chunk.text, Some(chunk.gold_score), sentence_classes)
    }

    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    /// Number of reviews seen so far, failed ones included.
    pub fn documents(&self) -> usize {
        self.documents
    }
}
