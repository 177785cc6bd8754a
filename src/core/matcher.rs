use crate::core::scoring::score_pair;
use crate::models::{
    ComparablePerson, MatchThresholds, MatchedPair, ScoringWeights, TreeComparison,
};
use std::collections::HashSet;

/// Tree-level matching engine.
///
/// Drives the pairwise scorer over the cross product of two trees, selects
/// a one-to-one set of pairs greedily by descending score, and applies the
/// tree-level decision thresholds.
#[derive(Debug, Clone)]
pub struct TreeMatcher {
    weights: ScoringWeights,
    thresholds: MatchThresholds,
}

impl TreeMatcher {
    pub fn new(weights: ScoringWeights, thresholds: MatchThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: MatchThresholds::default(),
        }
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Compare two trees and decide whether they plausibly represent the
    /// same or overlapping family.
    ///
    /// Pure and deterministic: no I/O, no shared state, safe to call
    /// concurrently for independent tree pairs.
    ///
    /// Selection is greedy best-score-first, not a maximum-weight bipartite
    /// assignment. Ties keep cross-product iteration order (stable sort),
    /// so results are stable with respect to input ordering.
    pub fn compare(
        &self,
        tree_a: &[ComparablePerson],
        tree_b: &[ComparablePerson],
    ) -> TreeComparison {
        if tree_a.is_empty() || tree_b.is_empty() {
            return TreeComparison::not_similar();
        }

        // Score the full cross product, keeping only pairs that clear the
        // per-pair bar.
        let mut candidates: Vec<(usize, usize, f64, Vec<String>)> = Vec::new();
        for (i, a) in tree_a.iter().enumerate() {
            for (j, b) in tree_b.iter().enumerate() {
                let pair = score_pair(a, b, &self.weights, &self.thresholds);
                if pair.score >= self.thresholds.pair_minimum {
                    candidates.push((i, j, pair.score, pair.reasons));
                }
            }
        }

        if candidates.is_empty() {
            return TreeComparison::not_similar();
        }

        candidates.sort_by(|x, y| y.2.partial_cmp(&x.2).unwrap_or(std::cmp::Ordering::Equal));

        // Greedy one-to-one selection: no person may appear in more than
        // one accepted pair within a single comparison.
        let mut claimed_a: HashSet<usize> = HashSet::new();
        let mut claimed_b: HashSet<usize> = HashSet::new();
        let mut contributing_pairs: Vec<MatchedPair> = Vec::new();
        let mut score = 0.0;

        for (i, j, pair_score, reasons) in candidates {
            if claimed_a.contains(&i) || claimed_b.contains(&j) {
                continue;
            }
            claimed_a.insert(i);
            claimed_b.insert(j);
            score += pair_score;
            contributing_pairs.push(MatchedPair {
                person1: tree_a[i].clone(),
                person2: tree_b[j].clone(),
                pair_score,
                reasons,
            });
        }

        let is_similar = score >= self.thresholds.tree_minimum
            && contributing_pairs.len() >= self.thresholds.min_contributing_pairs;

        TreeComparison {
            is_similar,
            score,
            contributing_pairs,
        }
    }
}

impl Default for TreeMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
