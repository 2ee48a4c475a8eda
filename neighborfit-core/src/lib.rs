//! Core domain types for the NeighborFit engine.
//!
//! These models carry the raw area data, the per-user preference profile
//! and the filters handed to storage. Constructors and deserialisation
//! validate their input so downstream scoring can stay total.
//!
//! - [`derive_scores`] computes the safety and lifestyle metrics.
//! - [`build_criteria`] turns a [`PreferenceProfile`] into a
//!   [`StructuralFilter`].
//! - [`Scorer`], [`AreaStore`] and [`AccountStore`] are the seams the
//!   engine is assembled from.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod area;
pub mod criteria;
mod error;
pub mod favorite;
mod limit;
pub mod memory;
pub mod profile;
pub mod scorer;
pub mod scores;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use area::{Area, AreaAttributes, AreaError, AreaId, AreaKind, Walkability};
pub use criteria::{
    AnonymousQuery, AreaOrder, Predicate, SearchQuery, SortDirection, SortKey, StructuralFilter,
    build_criteria,
};
pub use error::ValidationError;
pub use favorite::{Favorite, UserId};
pub use limit::Limit;
pub use memory::{AccountError, MemoryAccountStore, MemoryAreaStore};
pub use profile::{Preference, PreferenceProfile, PreferenceUpdate, Weights, WeightsInput};
pub use scorer::{MatchScore, ScoreBreakdown, Scorer};
pub use scores::{DerivedScores, derive_scores, round_half_up, to_score};
pub use store::{AccountStore, AreaStore, PopulationStats};
