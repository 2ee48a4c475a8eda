//! Areas a user has marked as favourites.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::{Area, AreaId};

/// Identity of a user known to the account collaborator.
pub type UserId = u64;

/// A favourited area resolved to its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// The favourited area.
    pub area: Area,
    /// When the user added it.
    pub added_at: SystemTime,
}

impl Favorite {
    /// Create a favourite stamped with the current time.
    #[must_use]
    pub fn now(area: Area) -> Self {
        Self {
            area,
            added_at: SystemTime::now(),
        }
    }

    /// Identity of the favourited area.
    #[must_use]
    pub const fn area_id(&self) -> AreaId {
        self.area.id
    }
}
