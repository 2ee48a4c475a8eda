//! Collaborator interfaces the engine is driven through.
//!
//! [`AreaStore`] selects area records and owns population-wide aggregation;
//! [`AccountStore`] resolves a user's profile and favourites. Both report
//! their own failures through an associated error type that the engine
//! propagates unchanged.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    Area, AreaId, AreaKind, AreaOrder, Favorite, PreferenceProfile, StructuralFilter, UserId,
    Walkability,
};

/// Read-only access to persisted area records.
///
/// Returned areas carry their raw attributes; derived scores are computed
/// on read through [`Area::scores`].
pub trait AreaStore {
    /// Failure raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every area satisfying `filter`, sorted by `order` when given
    /// and truncated to `limit` when given.
    ///
    /// # Errors
    /// Returns the store's own error when the query fails.
    fn find(
        &self,
        filter: &StructuralFilter,
        order: Option<AreaOrder>,
        limit: Option<usize>,
    ) -> Result<Vec<Area>, Self::Error>;

    /// Return the areas whose identities appear in `ids`.
    ///
    /// Unknown identities are skipped; callers detect them by comparing
    /// the result size against the request.
    ///
    /// # Errors
    /// Returns the store's own error when the query fails.
    fn find_by_ids(&self, ids: &[AreaId]) -> Result<Vec<Area>, Self::Error>;

    /// Return the distinct city names, sorted.
    ///
    /// # Errors
    /// Returns the store's own error when the query fails.
    fn cities(&self) -> Result<Vec<String>, Self::Error>;

    /// Aggregate statistics over the whole population.
    ///
    /// # Errors
    /// Returns the store's own error when the query fails.
    fn statistics(&self) -> Result<PopulationStats, Self::Error>;
}

/// Access to users' preference profiles and favourites.
pub trait AccountStore {
    /// Failure raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return the user's current profile, or `None` for an unknown user.
    ///
    /// # Errors
    /// Returns the store's own error when the lookup fails.
    fn preferences(&self, user: UserId) -> Result<Option<PreferenceProfile>, Self::Error>;

    /// Return the user's favourites resolved to their areas, or `None` for
    /// an unknown user.
    ///
    /// # Errors
    /// Returns the store's own error when the lookup fails.
    fn favorites(&self, user: UserId) -> Result<Option<Vec<Favorite>>, Self::Error>;
}

/// Population-wide aggregates reported by an [`AreaStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationStats {
    /// Number of areas.
    pub total_areas: usize,
    /// Mean population.
    pub avg_population: f64,
    /// Mean violent crime rate.
    pub avg_crime_rate: f64,
    /// Mean safety score.
    pub avg_safety_score: f64,
    /// Mean lifestyle score.
    pub avg_lifestyle_score: f64,
    /// Distinct cities.
    pub cities: BTreeSet<String>,
    /// Area count per walkability level.
    pub walkability: BTreeMap<Walkability, usize>,
    /// Area count per area type.
    pub types: BTreeMap<AreaKind, usize>,
}

impl PopulationStats {
    /// Aggregate over an in-memory collection.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "averages are computed over the collection"
    )]
    pub fn from_areas<'a, I>(areas: I) -> Self
    where
        I: IntoIterator<Item = &'a Area>,
    {
        let mut stats = Self::default();
        let mut population = 0.0;
        let mut crime = 0.0;
        let mut safety = 0.0;
        let mut lifestyle = 0.0;
        for area in areas {
            let attributes = &area.attributes;
            let scores = area.scores();
            stats.total_areas += 1;
            population += attributes.population as f64;
            crime += attributes.violent_crime_rate;
            safety += f64::from(scores.safety);
            lifestyle += f64::from(scores.lifestyle);
            stats.cities.insert(attributes.city.clone());
            *stats.walkability.entry(attributes.walkability).or_default() += 1;
            *stats.types.entry(attributes.kind).or_default() += 1;
        }
        if stats.total_areas > 0 {
            let count = stats.total_areas as f64;
            stats.avg_population = population / count;
            stats.avg_crime_rate = crime / count;
            stats.avg_safety_score = safety / count;
            stats.avg_lifestyle_score = lifestyle / count;
        }
        stats
    }
}
