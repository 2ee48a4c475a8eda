//! Facade crate for the NeighborFit area matching engine.
//!
//! This crate re-exports the core domain types, the pure scoring, ranking,
//! comparison and recommendation functions, and the service that wires them
//! to storage.
//!
//! # Examples
//! ```
//! use neighborfit_engine::{Area, AreaAttributes, AreaKind, Walkability, compare, derive_scores};
//!
//! let attributes = |name: &str, rate: f64| AreaAttributes {
//!     city: "Pune".into(),
//!     name: name.into(),
//!     kind: AreaKind::Urban,
//!     population: 10_000,
//!     violent_crime_count: 10.0,
//!     violent_crime_rate: rate,
//!     chargesheeting_rate: 60.0,
//!     public_transport_access: true,
//!     park_count: 1,
//!     school_count: 1,
//!     pet_friendly: false,
//!     walkability: Walkability::Medium,
//!     average_rent: None,
//!     average_home_price: None,
//! };
//! assert_eq!(derive_scores(&attributes("Baner", 20.0)).safety, 70);
//!
//! let areas = [
//!     Area::new(1, attributes("Baner", 20.0)).expect("valid area"),
//!     Area::new(2, attributes("Aundh", 10.0)).expect("valid area"),
//! ];
//! let comparison = compare(&areas).expect("two areas");
//! assert_eq!(comparison.best_safety.id, 2);
//! ```

#![forbid(unsafe_code)]

pub use neighborfit_core::{
    AccountStore, AnonymousQuery, Area, AreaAttributes, AreaId, AreaKind, AreaStore, Favorite,
    Limit, MatchScore, MemoryAccountStore, MemoryAreaStore, PopulationStats, Preference,
    PreferenceProfile, PreferenceUpdate, ScoreBreakdown, Scorer, SearchQuery, StructuralFilter,
    UserId, ValidationError, Walkability, Weights, build_criteria, derive_scores,
};

pub use neighborfit_scorer::{
    Comparison, EngineError, MatchResult, MatchingService, NotFound, RankedSet, Recommendation,
    WeightedMatchScorer, compare, rank, recommend,
};
