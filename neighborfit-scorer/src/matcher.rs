//! Weighted multi-criteria match scoring.
//!
//! Four terms are evaluated in a fixed order (safety, lifestyle,
//! walkability, affordability). Each term lies in `0..=100` before it is
//! multiplied by the profile's weight for that axis; the weighted
//! contributions are summed and rounded half up into the total.

use neighborfit_core::{
    Area, MatchScore, PreferenceProfile, ScoreBreakdown, Scorer, round_half_up, to_score,
};

/// Scorer applying a profile's [`Weights`](neighborfit_core::Weights) to
/// safety, lifestyle, walkability and affordability terms.
///
/// # Examples
/// ```
/// use neighborfit_core::{PreferenceProfile, Scorer, test_support::sample_area};
/// use neighborfit_scorer::WeightedMatchScorer;
///
/// let area = sample_area(1); // safety 70, lifestyle 65, walkability High
/// let score = WeightedMatchScorer.score(&area, &PreferenceProfile::default());
/// assert_eq!(score.total, 61);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMatchScorer;

/// Raw terms before weighting, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Terms {
    pub(crate) safety: f64,
    pub(crate) lifestyle: f64,
    pub(crate) walkability: f64,
    pub(crate) affordability: f64,
}

impl WeightedMatchScorer {
    pub(crate) fn terms(area: &Area, profile: &PreferenceProfile) -> Terms {
        let scores = area.scores();
        Terms {
            safety: f64::from(scores.safety),
            lifestyle: f64::from(scores.lifestyle),
            walkability: f64::from(area.attributes.walkability.match_term()),
            affordability: Self::sanitise(affordability_term(
                area.attributes.average_rent,
                profile.max_rent,
            )),
        }
    }
}

/// Linear rent penalty: 100 at or below budget, falling to 0 at twice the
/// budget. A missing or zero rent or budget counts as unknown and yields 0.
#[expect(
    clippy::float_arithmetic,
    reason = "affordability is a linear penalty on the rent overshoot"
)]
pub(crate) fn affordability_term(average_rent: Option<f64>, max_rent: Option<f64>) -> f64 {
    match (average_rent, max_rent) {
        (Some(rent), Some(budget)) if rent > 0.0 && budget > 0.0 => {
            (100.0 - (rent - budget) / budget * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

impl Scorer for WeightedMatchScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "weighted sum of the four match terms"
    )]
    fn score(&self, area: &Area, profile: &PreferenceProfile) -> MatchScore {
        let terms = Self::terms(area, profile);
        let weights = profile.weights;
        let safety = terms.safety / 100.0 * weights.safety() * 100.0;
        let lifestyle = terms.lifestyle / 100.0 * weights.lifestyle() * 100.0;
        let walkability = terms.walkability / 100.0 * weights.walkability() * 100.0;
        let affordability = terms.affordability / 100.0 * weights.affordability() * 100.0;
        let total = safety + lifestyle + walkability + affordability;

        MatchScore {
            total: to_score(round_half_up(total)),
            breakdown: ScoreBreakdown {
                safety: to_score(round_half_up(safety)),
                lifestyle: to_score(round_half_up(lifestyle)),
                walkability: to_score(round_half_up(walkability)),
                affordability: to_score(round_half_up(affordability)),
            },
        }
    }
}
