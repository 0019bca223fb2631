//! Running accuracy over a sequence of scored reviews.

use crate::aggregate::ReviewScore;

/// Hit/total counters for one run.
///
/// Owned by whoever drives the run and updated once per scored review, in
/// arrival order. The final accuracy only depends on the multiset of
/// (computed, gold) pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningStats {
    successful_hits: usize,
    total_reviews: usize,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one review and return the accuracy so far.
    pub fn track(&mut self, computed: ReviewScore, gold_score: i64) -> f64 {
        self.total_reviews += 1;
        if computed.value() == gold_score {
            self.successful_hits += 1;
        }
        self.accuracy()
    }

    /// `successful_hits / total_reviews`, or `0.0` before the first review.
    pub fn accuracy(&self) -> f64 {
        if self.total_reviews == 0 {
            0.0
        } else {
            self.successful_hits as f64 / self.total_reviews as f64
        }
    }

    pub fn successful_hits(&self) -> usize {
        self.successful_hits
    }

    pub fn total_reviews(&self) -> usize {
        self.total_reviews
    }
}
