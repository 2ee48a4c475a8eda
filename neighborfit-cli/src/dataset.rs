//! JSON dataset loading into the in-memory collaborators.
//!
//! A dataset holds the area population and the registered users:
//!
//! ```json
//! {
//!   "areas": [{ "id": 1, "city": "Pune", "name": "Baner", "type": "Suburban", ... }],
//!   "users": [{ "id": 7, "preferences": { ... }, "favorites": [{ "areaId": 1 }] }]
//! }
//! ```
//!
//! `addedAt` on a favourite is optional and counts seconds since the Unix
//! epoch; favourites without it are stamped with the load time.

use std::io::{BufReader, ErrorKind};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use log::debug;
use neighborfit_core::{
    Area, AreaId, MemoryAccountStore, MemoryAreaStore, PreferenceProfile, UserId,
};
use neighborfit_scorer::MatchingService;
use serde::Deserialize;

use crate::CliError;

/// Engine backed by a loaded dataset.
pub(crate) type DatasetService = MatchingService<MemoryAreaStore, MemoryAccountStore>;

/// Decoded dataset document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Dataset {
    pub(crate) areas: Vec<Area>,
    pub(crate) users: Vec<UserRecord>,
}

/// A registered user with their stored profile and favourites.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRecord {
    pub(crate) id: UserId,
    #[serde(default)]
    pub(crate) preferences: PreferenceProfile,
    #[serde(default)]
    pub(crate) favorites: Vec<FavoriteRecord>,
}

/// Reference to a favourite area.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FavoriteRecord {
    pub(crate) area_id: AreaId,
    #[serde(default)]
    pub(crate) added_at: Option<u64>,
}

impl Dataset {
    /// Build the collaborators, resolving every favourite to its area.
    pub(crate) fn into_service(self) -> Result<DatasetService, CliError> {
        let areas = MemoryAreaStore::with_areas(self.areas);
        let mut accounts = MemoryAccountStore::default();
        let loaded_at = SystemTime::now();
        for user in self.users {
            accounts.register(user.id, user.preferences);
            for favorite in user.favorites {
                let area = areas
                    .get(favorite.area_id)
                    .cloned()
                    .ok_or(CliError::UnknownFavoriteArea {
                        user: user.id,
                        area: favorite.area_id,
                    })?;
                let added_at = favorite
                    .added_at
                    .and_then(|secs| UNIX_EPOCH.checked_add(Duration::from_secs(secs)))
                    .unwrap_or(loaded_at);
                accounts.add_favorite(user.id, area, added_at)?;
            }
        }
        debug!("loaded dataset with {} areas", areas.areas().len());
        Ok(MatchingService::new(areas, accounts))
    }
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_dataset(path: &Utf8Path) -> Result<(), CliError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let Some(name) = path.file_name() else {
        return Err(CliError::DatasetNotFile {
            path: path.to_path_buf(),
        });
    };
    let metadata = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.metadata(name));
    match metadata {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(CliError::DatasetNotFile {
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == ErrorKind::NotFound => Err(CliError::MissingDataset {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::OpenDataset {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load and decode a dataset from disk.
pub(crate) fn load_dataset(path: &Utf8Path) -> Result<Dataset, CliError> {
    require_dataset(path)?;
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenDataset {
            path: path.to_path_buf(),
            source,
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseDataset {
        path: path.to_path_buf(),
        source,
    })
}
