//! Order scored candidates and cut them to the requested size.

use neighborfit_core::{Area, Limit, PreferenceProfile, ScoreBreakdown, Scorer, StructuralFilter};
use serde::Serialize;

/// A candidate area with its match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// The scored area.
    pub area: Area,
    /// Overall match score in `0..=100`.
    pub total_score: u8,
    /// Weighted per-axis contributions.
    pub breakdown: ScoreBreakdown,
}

impl MatchResult {
    /// Score `area` against `profile`.
    #[must_use]
    pub fn score<C: Scorer + ?Sized>(scorer: &C, area: Area, profile: &PreferenceProfile) -> Self {
        let score = scorer.score(&area, profile);
        Self {
            area,
            total_score: score.total,
            breakdown: score.breakdown,
        }
    }
}

/// Ranked matches together with the context they were produced in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSet {
    /// At most `limit` results, best first.
    pub results: Vec<MatchResult>,
    /// Number of candidates that passed structural filtering.
    pub total_candidates: usize,
    /// Filter the candidates were selected with.
    pub applied_filters: StructuralFilter,
}

/// Sort `results` by descending total score and keep the first `limit`.
///
/// The sort is stable, so equal scores keep their relative input order.
///
/// # Examples
/// ```
/// use neighborfit_core::{Limit, PreferenceProfile, test_support::area_with_scores};
/// use neighborfit_scorer::{MatchResult, WeightedMatchScorer, rank};
///
/// let profile = PreferenceProfile::default();
/// let results = [area_with_scores(1, 40, 40), area_with_scores(2, 90, 60)]
///     .into_iter()
///     .map(|a| MatchResult::score(&WeightedMatchScorer, a, &profile))
///     .collect();
/// let ranked = rank(results, Limit::new(1).expect("positive limit"));
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].area.id, 2);
/// ```
#[must_use]
pub fn rank(mut results: Vec<MatchResult>, limit: Limit) -> Vec<MatchResult> {
    results.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    results.truncate(limit.get());
    results
}
