//! Score areas against a user's preference profile.
//!
//! The `Scorer` trait assigns a match score to an [`Area`](crate::Area)
//! given a [`PreferenceProfile`](crate::PreferenceProfile).

use serde::{Deserialize, Serialize};

use crate::{Area, PreferenceProfile};

/// Weighted contribution of each match axis, in score points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Contribution of the safety term.
    pub safety: u8,
    /// Contribution of the lifestyle term.
    pub lifestyle: u8,
    /// Contribution of the walkability term.
    pub walkability: u8,
    /// Contribution of the affordability term.
    pub affordability: u8,
}

/// Total match score in `0..=100` with its per-axis breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    /// Overall score.
    pub total: u8,
    /// Per-axis contributions.
    pub breakdown: ScoreBreakdown,
}

/// Calculate a match score for an area.
///
/// Higher scores indicate a better fit between the area and the caller's
/// preferences. Implementations must be thread-safe (`Send` + `Sync`) so
/// scoring can fan out across threads. The method is infallible: missing
/// optional data degrades the affected term to zero.
///
/// Implementations must be deterministic and keep every value within
/// `0..=100`. Use [`Scorer::sanitise`] to clamp intermediate terms.
///
/// # Examples
///
/// ```rust
/// use neighborfit_core::{Area, MatchScore, PreferenceProfile, Scorer};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score(&self, _area: &Area, _profile: &PreferenceProfile) -> MatchScore {
///         MatchScore::default()
///     }
/// }
///
/// assert_eq!(FlatScorer::sanitise(f64::NAN), 0.0);
/// assert_eq!(FlatScorer::sanitise(140.0), 100.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return the match score for `area` according to `profile`.
    fn score(&self, area: &Area, profile: &PreferenceProfile) -> MatchScore;

    /// Clamp and validate a raw term.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=100.0`.
    #[must_use]
    fn sanitise(term: f64) -> f64
    where
        Self: Sized,
    {
        if !term.is_finite() {
            return 0.0;
        }
        term.clamp(0.0, 100.0)
    }
}
