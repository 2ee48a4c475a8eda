//! Recommend areas resembling a user's favourites.
//!
//! The user's taste is summarised as the mean safety and lifestyle score of
//! their favourites. Candidates qualify when both of their scores fall
//! within [`SimilarityBand::HALF_WIDTH`] of those means.

use std::collections::HashSet;

use neighborfit_core::{
    Area, AreaId, AreaOrder, Limit, Predicate, StructuralFilter, round_half_up, to_score,
};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Mean scores of a set of favourite areas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityBand {
    /// Mean safety score of the favourites.
    pub avg_safety: f64,
    /// Mean lifestyle score of the favourites.
    pub avg_lifestyle: f64,
}

impl SimilarityBand {
    /// Maximum distance from the mean, inclusive, on either axis.
    pub const HALF_WIDTH: f64 = 10.0;

    /// Average the scores of `favorites`, or `None` when there are none.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "band centre is the arithmetic mean of the favourites"
    )]
    pub fn from_favorites(favorites: &[Area]) -> Option<Self> {
        if favorites.is_empty() {
            return None;
        }
        let count = favorites.len() as f64;
        let (safety, lifestyle) = favorites.iter().fold((0.0, 0.0), |(s, l), area| {
            (
                s + f64::from(area.safety_score()),
                l + f64::from(area.lifestyle_score()),
            )
        });
        Some(Self {
            avg_safety: safety / count,
            avg_lifestyle: lifestyle / count,
        })
    }

    /// Predicates selecting the band, excluding the given identities.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "band bounds are offsets from the means"
    )]
    pub fn to_filter(&self, exclude: Vec<AreaId>) -> StructuralFilter {
        StructuralFilter::new()
            .with(Predicate::SafetyBetween {
                min: self.avg_safety - Self::HALF_WIDTH,
                max: self.avg_safety + Self::HALF_WIDTH,
            })
            .with(Predicate::LifestyleBetween {
                min: self.avg_lifestyle - Self::HALF_WIDTH,
                max: self.avg_lifestyle + Self::HALF_WIDTH,
            })
            .with(Predicate::ExcludeIds(exclude))
    }
}

/// Summary of the favourites a recommendation was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasedOn {
    /// Number of favourites.
    pub favorite_count: usize,
    /// Mean safety score, rounded half up.
    pub avg_safety: u8,
    /// Mean lifestyle score, rounded half up.
    pub avg_lifestyle: u8,
}

/// Outcome of a recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// The user has no favourites to learn from.
    NoFavorites,
    /// Areas close to the favourites' mean scores.
    Similar {
        /// Recommended areas, safest first.
        results: Vec<Area>,
        /// The favourites the band was derived from.
        based_on: BasedOn,
    },
}

impl Recommendation {
    /// Reason reported when the user has no favourites.
    pub const NO_FAVORITES_REASON: &'static str = "no favorites";

    /// Recommended areas; empty when there were no favourites.
    #[must_use]
    pub fn results(&self) -> &[Area] {
        match self {
            Self::NoFavorites => &[],
            Self::Similar { results, .. } => results,
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoFavorites => {
                let mut state = serializer.serialize_struct("Recommendation", 2)?;
                state.serialize_field("results", &[] as &[Area])?;
                state.serialize_field("reason", Self::NO_FAVORITES_REASON)?;
                state.end()
            }
            Self::Similar { results, based_on } => {
                let mut state = serializer.serialize_struct("Recommendation", 2)?;
                state.serialize_field("results", results)?;
                state.serialize_field("basedOn", based_on)?;
                state.end()
            }
        }
    }
}

/// Pick up to `limit` areas from `pool` that resemble `favorites`.
///
/// Favourites themselves are never recommended. Results are ordered by
/// descending safety score, then descending lifestyle score; remaining
/// ties keep pool order.
///
/// # Examples
/// ```
/// use neighborfit_core::{Limit, test_support::area_with_scores};
/// use neighborfit_scorer::recommend;
///
/// let favorites = [area_with_scores(1, 80, 60), area_with_scores(2, 70, 50)];
/// let pool = [area_with_scores(3, 76, 55), area_with_scores(4, 40, 55)];
/// let rec = recommend(&favorites, pool, Limit::new(5).expect("positive limit"));
/// assert_eq!(rec.results().len(), 1);
/// assert_eq!(rec.results()[0].id, 3);
/// ```
#[must_use]
pub fn recommend<I>(favorites: &[Area], pool: I, limit: Limit) -> Recommendation
where
    I: IntoIterator<Item = Area>,
{
    let Some(band) = SimilarityBand::from_favorites(favorites) else {
        return Recommendation::NoFavorites;
    };
    let favorite_ids: HashSet<AreaId> = favorites.iter().map(|a| a.id).collect();
    let filter = band.to_filter(Vec::new());
    let mut results: Vec<Area> = pool
        .into_iter()
        .filter(|a| !favorite_ids.contains(&a.id) && filter.matches(a))
        .collect();
    results.sort_by(|a, b| AreaOrder::SafetyThenLifestyle.compare(a, b));
    results.truncate(limit.get());

    Recommendation::Similar {
        results,
        based_on: BasedOn {
            favorite_count: favorites.len(),
            avg_safety: to_score(round_half_up(band.avg_safety)),
            avg_lifestyle: to_score(round_half_up(band.avg_lifestyle)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighborfit_core::test_support::area_with_scores;
    use rstest::rstest;
    use serde_json::json;

    fn limit(n: usize) -> Limit {
        Limit::new(n).expect("positive limit")
    }

    #[rstest]
    fn band_is_the_mean_of_favorites() {
        let band = SimilarityBand::from_favorites(&[
            area_with_scores(1, 80, 60),
            area_with_scores(2, 70, 50),
        ])
        .expect("non-empty favorites");
        assert!((band.avg_safety - 75.0).abs() < f64::EPSILON);
        assert!((band.avg_lifestyle - 55.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::lower_edge(65, 45, true)]
    #[case::upper_edge(85, 65, true)]
    #[case::safety_below(64, 55, false)]
    #[case::lifestyle_above(75, 70, false)]
    fn band_bounds_are_inclusive(#[case] safety: u8, #[case] lifestyle: u8, #[case] kept: bool) {
        let favorites = [area_with_scores(1, 80, 60), area_with_scores(2, 70, 50)];
        let rec = recommend(&favorites, [area_with_scores(9, safety, lifestyle)], limit(5));
        assert_eq!(!rec.results().is_empty(), kept);
    }

    #[rstest]
    fn excludes_favorites_and_orders_by_safety_then_lifestyle() {
        let favorites = [area_with_scores(1, 80, 60), area_with_scores(2, 70, 50)];
        let pool = [
            area_with_scores(1, 80, 60),
            area_with_scores(3, 70, 50),
            area_with_scores(4, 80, 45),
            area_with_scores(5, 80, 55),
        ];
        let rec = recommend(&favorites, pool, limit(2));
        let ids: Vec<_> = rec.results().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[rstest]
    fn no_favorites_yields_message() {
        let rec = recommend(&[], [area_with_scores(1, 80, 60)], limit(5));
        assert_eq!(rec, Recommendation::NoFavorites);
        let value = serde_json::to_value(&rec).expect("serialise");
        assert_eq!(
            value,
            json!({
                "results": [],
                "reason": "no favorites"
            })
        );
    }

    #[rstest]
    fn based_on_rounds_averages() {
        let favorites = [area_with_scores(1, 71, 60), area_with_scores(2, 70, 55)];
        let rec = recommend(&favorites, [], limit(5));
        let Recommendation::Similar { based_on, .. } = rec else {
            panic!("expected similar recommendation");
        };
        assert_eq!(
            based_on,
            BasedOn {
                favorite_count: 2,
                avg_safety: 71,
                avg_lifestyle: 58,
            }
        );
    }
}
