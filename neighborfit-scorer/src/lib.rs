//! Matching, ranking, comparison and recommendation for NeighborFit.
//!
//! The crate provides the pure engine components and a service wiring them
//! to storage:
//! - [`WeightedMatchScorer`] implements [`Scorer`](neighborfit_core::Scorer)
//!   with the four-term weighted match formula.
//! - [`rank`] orders scored candidates and applies a result bound.
//! - [`compare`] reduces a small set of areas to a side-by-side summary.
//! - [`recommend`] finds areas resembling a user's favourites.
//! - [`MatchingService`] drives all of the above through
//!   [`AreaStore`](neighborfit_core::AreaStore) and
//!   [`AccountStore`](neighborfit_core::AccountStore) collaborators.
//!
//! # Examples
//!
//! ```
//! use neighborfit_core::test_support::area_with_scores;
//! use neighborfit_scorer::compare;
//!
//! let comparison = compare(&[area_with_scores(1, 70, 40), area_with_scores(2, 85, 40)])
//!     .expect("two distinct areas");
//! assert_eq!(comparison.best_safety.id, 2);
//! assert!(comparison.most_walkable.is_empty());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod comparator;
mod error;
mod matcher;
mod ranker;
mod recommend;
mod service;

pub use comparator::{AreaMetrics, Comparison, MetricsSnapshot, compare};
pub use error::{EngineError, NotFound};
pub use matcher::WeightedMatchScorer;
pub use ranker::{MatchResult, RankedSet, rank};
pub use recommend::{BasedOn, Recommendation, SimilarityBand, recommend};
pub use service::MatchingService;
