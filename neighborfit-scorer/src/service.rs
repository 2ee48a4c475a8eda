//! Engine operations driven through the storage and account collaborators.

use std::collections::HashSet;

use log::{debug, warn};
use neighborfit_core::{
    AccountStore, AnonymousQuery, Area, AreaId, AreaOrder, AreaStore, Limit, PopulationStats,
    Scorer, SearchQuery, UserId, ValidationError, build_criteria,
};

use crate::{
    Comparison, EngineError, MatchResult, NotFound, RankedSet, Recommendation, SimilarityBand,
    WeightedMatchScorer, compare, rank, recommend,
};

/// Matching, comparison and recommendation over a pair of collaborators.
///
/// The service holds no mutable state; every call reads a fresh snapshot
/// from its collaborators.
///
/// # Examples
/// ```
/// use neighborfit_core::{
///     Limit, MemoryAccountStore, MemoryAreaStore, PreferenceProfile,
///     test_support::sample_area,
/// };
/// use neighborfit_scorer::MatchingService;
///
/// let areas = MemoryAreaStore::with_areas([sample_area(1), sample_area(2)]);
/// let mut accounts = MemoryAccountStore::default();
/// accounts.register(7, PreferenceProfile::default());
/// let service = MatchingService::new(areas, accounts);
///
/// let ranked = service
///     .matches(7, None, Limit::new(10).expect("positive limit"))
///     .expect("known user");
/// assert_eq!(ranked.total_candidates, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MatchingService<S, A, C = WeightedMatchScorer> {
    areas: S,
    accounts: A,
    scorer: C,
}

impl<S, A> MatchingService<S, A>
where
    S: AreaStore,
    A: AccountStore,
{
    /// Create a service scoring with [`WeightedMatchScorer`].
    #[must_use]
    pub const fn new(areas: S, accounts: A) -> Self {
        Self {
            areas,
            accounts,
            scorer: WeightedMatchScorer,
        }
    }
}

impl<S, A, C> MatchingService<S, A, C>
where
    S: AreaStore,
    A: AccountStore,
    C: Scorer,
{
    /// Create a service with a custom scorer.
    #[must_use]
    pub const fn with_scorer(areas: S, accounts: A, scorer: C) -> Self {
        Self {
            areas,
            accounts,
            scorer,
        }
    }

    /// The storage collaborator.
    #[must_use]
    pub const fn areas(&self) -> &S {
        &self.areas
    }

    /// The account collaborator.
    #[must_use]
    pub const fn accounts(&self) -> &A {
        &self.accounts
    }

    /// Score every area passing the user's structural preferences and
    /// return the best `limit` of them.
    ///
    /// # Errors
    /// [`NotFound::User`] for an unknown user, or
    /// [`EngineError::Collaborator`] when a collaborator fails.
    pub fn matches(
        &self,
        user: UserId,
        city: Option<&str>,
        limit: Limit,
    ) -> Result<RankedSet, EngineError> {
        let profile = self
            .accounts
            .preferences(user)
            .map_err(EngineError::collaborator("loading preferences"))?
            .ok_or(NotFound::User(user))?;
        let filter = build_criteria(&profile, city);
        let candidates = self
            .areas
            .find(&filter, None, None)
            .map_err(EngineError::collaborator("finding candidate areas"))?;
        let total_candidates = candidates.len();
        debug!(
            "scoring {total_candidates} candidates for user {user} with {} predicates",
            filter.len()
        );
        if total_candidates == 0 {
            warn!("no areas satisfy the preferences of user {user}");
        }

        let scored = candidates
            .into_iter()
            .map(|area| MatchResult::score(&self.scorer, area, &profile))
            .collect();
        Ok(RankedSet {
            results: rank(scored, limit),
            total_candidates,
            applied_filters: filter,
        })
    }

    /// Areas passing `query`, safest first, without match scoring.
    ///
    /// # Errors
    /// [`EngineError::Collaborator`] when the storage collaborator fails.
    pub fn anonymous_matches(
        &self,
        query: &AnonymousQuery,
        limit: Limit,
    ) -> Result<Vec<Area>, EngineError> {
        let filter = query.to_filter();
        let found = self
            .areas
            .find(
                &filter,
                Some(AreaOrder::SafetyThenLifestyle),
                Some(limit.get()),
            )
            .map_err(EngineError::collaborator("finding anonymous matches"))?;
        debug!("anonymous query matched {} areas", found.len());
        Ok(found)
    }

    /// Areas passing `query`, in the order it requests.
    ///
    /// # Errors
    /// [`EngineError::Collaborator`] when the storage collaborator fails.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<Area>, EngineError> {
        self.areas
            .find(&query.to_filter(), Some(query.ordering()), None)
            .map_err(EngineError::collaborator("searching areas"))
    }

    /// Look up one area.
    ///
    /// # Errors
    /// [`NotFound::Area`] when no such area exists, or
    /// [`EngineError::Collaborator`] when the storage collaborator fails.
    pub fn area(&self, id: AreaId) -> Result<Area, EngineError> {
        self.areas
            .find_by_ids(&[id])
            .map_err(EngineError::collaborator("loading area"))?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| NotFound::Area(id).into())
    }

    /// Compare the areas named by `ids`, in the order given.
    ///
    /// # Errors
    /// [`ValidationError::TooFewAreas`] for fewer than two distinct
    /// identities, [`NotFound::Areas`] when any identity is unknown, or
    /// [`EngineError::Collaborator`] when the storage collaborator fails.
    pub fn compare(&self, ids: &[AreaId]) -> Result<Comparison, EngineError> {
        let mut seen = HashSet::new();
        let distinct: Vec<AreaId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if distinct.len() < 2 {
            return Err(ValidationError::TooFewAreas {
                supplied: distinct.len(),
            }
            .into());
        }

        let found = self
            .areas
            .find_by_ids(&distinct)
            .map_err(EngineError::collaborator("loading areas to compare"))?;
        if found.len() != distinct.len() {
            let missing = distinct
                .iter()
                .copied()
                .filter(|id| !found.iter().any(|a| a.id == *id))
                .collect();
            return Err(NotFound::Areas { missing }.into());
        }

        let ordered: Vec<Area> = distinct
            .iter()
            .filter_map(|id| found.iter().find(|a| a.id == *id).cloned())
            .collect();
        compare(&ordered).map_err(EngineError::from)
    }

    /// Recommend up to `limit` areas resembling the user's favourites.
    ///
    /// # Errors
    /// [`NotFound::User`] for an unknown user, or
    /// [`EngineError::Collaborator`] when a collaborator fails.
    pub fn recommendations(
        &self,
        user: UserId,
        limit: Limit,
    ) -> Result<Recommendation, EngineError> {
        let favorites: Vec<Area> = self
            .accounts
            .favorites(user)
            .map_err(EngineError::collaborator("loading favorites"))?
            .ok_or(NotFound::User(user))?
            .into_iter()
            .map(|f| f.area)
            .collect();
        let Some(band) = SimilarityBand::from_favorites(&favorites) else {
            debug!("user {user} has no favorites to recommend from");
            return Ok(Recommendation::NoFavorites);
        };
        debug!(
            "recommendation band for user {user}: safety {:.1}, lifestyle {:.1}",
            band.avg_safety, band.avg_lifestyle
        );

        let exclude = favorites.iter().map(|a| a.id).collect();
        let pool = self
            .areas
            .find(
                &band.to_filter(exclude),
                Some(AreaOrder::SafetyThenLifestyle),
                Some(limit.get()),
            )
            .map_err(EngineError::collaborator("finding similar areas"))?;
        Ok(recommend(&favorites, pool, limit))
    }

    /// Distinct city names, sorted.
    ///
    /// # Errors
    /// [`EngineError::Collaborator`] when the storage collaborator fails.
    pub fn cities(&self) -> Result<Vec<String>, EngineError> {
        self.areas
            .cities()
            .map_err(EngineError::collaborator("listing cities"))
    }

    /// Population-wide statistics from the storage collaborator.
    ///
    /// # Errors
    /// [`EngineError::Collaborator`] when the storage collaborator fails.
    pub fn statistics(&self) -> Result<PopulationStats, EngineError> {
        self.areas
            .statistics()
            .map_err(EngineError::collaborator("computing statistics"))
    }
}
