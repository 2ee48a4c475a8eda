//! In-memory collaborators.
//!
//! [`MemoryAreaStore`] and [`MemoryAccountStore`] perform linear scans and
//! are intended for small datasets: the CLI and tests.

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::time::SystemTime;

use log::debug;
use thiserror::Error;

use crate::{
    AccountStore, Area, AreaId, AreaOrder, AreaStore, Favorite, PopulationStats,
    PreferenceProfile, StructuralFilter, UserId,
};

/// In-memory [`AreaStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryAreaStore {
    areas: Vec<Area>,
}

impl MemoryAreaStore {
    /// Create a store from a collection of areas.
    pub fn with_areas<I>(areas: I) -> Self
    where
        I: IntoIterator<Item = Area>,
    {
        Self {
            areas: areas.into_iter().collect(),
        }
    }

    /// Look up a single area.
    #[must_use]
    pub fn get(&self, id: AreaId) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// All stored areas in insertion order.
    #[must_use]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }
}

impl AreaStore for MemoryAreaStore {
    type Error = Infallible;

    fn find(
        &self,
        filter: &StructuralFilter,
        order: Option<AreaOrder>,
        limit: Option<usize>,
    ) -> Result<Vec<Area>, Self::Error> {
        let mut found: Vec<Area> = self
            .areas
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        if let Some(order) = order {
            found.sort_by(|a, b| order.compare(a, b));
        }
        if let Some(limit) = limit {
            found.truncate(limit);
        }
        debug!(
            "memory store matched {} of {} areas with {} predicates",
            found.len(),
            self.areas.len(),
            filter.len()
        );
        Ok(found)
    }

    fn find_by_ids(&self, ids: &[AreaId]) -> Result<Vec<Area>, Self::Error> {
        Ok(ids
            .iter()
            .filter_map(|id| self.get(*id))
            .cloned()
            .collect())
    }

    fn cities(&self) -> Result<Vec<String>, Self::Error> {
        let cities: BTreeSet<&str> = self
            .areas
            .iter()
            .map(|a| a.attributes.city.as_str())
            .collect();
        Ok(cities.into_iter().map(str::to_owned).collect())
    }

    fn statistics(&self) -> Result<PopulationStats, Self::Error> {
        Ok(PopulationStats::from_areas(&self.areas))
    }
}

/// Errors raised when mutating a [`MemoryAccountStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The user is not registered.
    #[error("user {0} not found")]
    UnknownUser(UserId),
    /// The area is already a favourite of the user.
    #[error("area {area} is already in user {user}'s favorites")]
    DuplicateFavorite {
        /// User identity.
        user: UserId,
        /// Area identity.
        area: AreaId,
    },
}

#[derive(Debug, Clone, Default)]
struct Account {
    preferences: PreferenceProfile,
    favorites: Vec<Favorite>,
}

/// In-memory [`AccountStore`].
///
/// Mutations take `&mut self`, so concurrent writers must be serialised by
/// the owner (for example behind a `Mutex`).
#[derive(Debug, Default, Clone)]
pub struct MemoryAccountStore {
    accounts: HashMap<UserId, Account>,
}

impl MemoryAccountStore {
    /// Register a user with the given profile and no favourites.
    pub fn register(&mut self, user: UserId, preferences: PreferenceProfile) {
        self.accounts.insert(
            user,
            Account {
                preferences,
                favorites: Vec::new(),
            },
        );
    }

    /// Replace a user's stored profile.
    ///
    /// # Errors
    /// Returns [`AccountError::UnknownUser`] for unregistered users.
    pub fn set_preferences(
        &mut self,
        user: UserId,
        preferences: PreferenceProfile,
    ) -> Result<(), AccountError> {
        let account = self.account_mut(user)?;
        account.preferences = preferences;
        Ok(())
    }

    /// Append `area` to the user's favourites.
    ///
    /// # Errors
    /// Returns [`AccountError::UnknownUser`] for unregistered users and
    /// [`AccountError::DuplicateFavorite`] when the area is already listed.
    pub fn add_favorite(
        &mut self,
        user: UserId,
        area: Area,
        added_at: SystemTime,
    ) -> Result<(), AccountError> {
        let account = self.account_mut(user)?;
        if account.favorites.iter().any(|f| f.area_id() == area.id) {
            return Err(AccountError::DuplicateFavorite {
                user,
                area: area.id,
            });
        }
        account.favorites.push(Favorite { area, added_at });
        Ok(())
    }

    /// Remove `area` from the user's favourites, returning whether it was
    /// present.
    ///
    /// # Errors
    /// Returns [`AccountError::UnknownUser`] for unregistered users.
    pub fn remove_favorite(&mut self, user: UserId, area: AreaId) -> Result<bool, AccountError> {
        let account = self.account_mut(user)?;
        let before = account.favorites.len();
        account.favorites.retain(|f| f.area_id() != area);
        Ok(account.favorites.len() != before)
    }

    fn account_mut(&mut self, user: UserId) -> Result<&mut Account, AccountError> {
        self.accounts
            .get_mut(&user)
            .ok_or(AccountError::UnknownUser(user))
    }
}

impl AccountStore for MemoryAccountStore {
    type Error = Infallible;

    fn preferences(&self, user: UserId) -> Result<Option<PreferenceProfile>, Self::Error> {
        Ok(self.accounts.get(&user).map(|a| a.preferences.clone()))
    }

    fn favorites(&self, user: UserId) -> Result<Option<Vec<Favorite>>, Self::Error> {
        Ok(self.accounts.get(&user).map(|a| a.favorites.clone()))
    }
}
