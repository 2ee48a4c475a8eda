//! Structural filters handed to the storage collaborator.
//!
//! A [`StructuralFilter`] is a conjunction of [`Predicate`]s. The engine
//! builds filters from a user's [`PreferenceProfile`] (see
//! [`build_criteria`]) or from ad-hoc queries, and passes them to an
//! [`AreaStore`](crate::AreaStore) to narrow the candidate population.
//! [`StructuralFilter::matches`] exists for collaborators that evaluate
//! filters in memory.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Area, AreaId, AreaKind, PreferenceProfile, Walkability};

/// A single condition on an [`Area`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "predicate", content = "value", rename_all = "camelCase")]
pub enum Predicate {
    /// Area type equals the value.
    Kind(AreaKind),
    /// Walkability equals the value.
    Walkability(Walkability),
    /// Pet-friendliness equals the value.
    PetFriendly(bool),
    /// Public transport access equals the value.
    PublicTransport(bool),
    /// `parkCount >= value`.
    MinParks(u32),
    /// `schoolCount > 0`.
    SchoolsNearby,
    /// `safetyScore >= value`.
    MinSafetyScore(u8),
    /// Case-insensitive substring match on the city name.
    CityContains(String),
    /// `violentCrimeRate <= value`.
    MaxCrimeRate(f64),
    /// `min <= safetyScore <= max`.
    SafetyBetween {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// `min <= lifestyleScore <= max`.
    LifestyleBetween {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// Identity not in the list.
    ExcludeIds(Vec<AreaId>),
}

impl Predicate {
    /// Evaluate the predicate against `area`.
    #[must_use]
    pub fn matches(&self, area: &Area) -> bool {
        let attributes = &area.attributes;
        match self {
            Self::Kind(kind) => attributes.kind == *kind,
            Self::Walkability(level) => attributes.walkability == *level,
            Self::PetFriendly(wanted) => attributes.pet_friendly == *wanted,
            Self::PublicTransport(wanted) => attributes.public_transport_access == *wanted,
            Self::MinParks(min) => attributes.park_count >= *min,
            Self::SchoolsNearby => attributes.school_count > 0,
            Self::MinSafetyScore(min) => area.safety_score() >= *min,
            Self::CityContains(needle) => attributes
                .city
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::MaxCrimeRate(max) => attributes.violent_crime_rate <= *max,
            Self::SafetyBetween { min, max } => {
                (*min..=*max).contains(&f64::from(area.safety_score()))
            }
            Self::LifestyleBetween { min, max } => {
                (*min..=*max).contains(&f64::from(area.lifestyle_score()))
            }
            Self::ExcludeIds(ids) => !ids.contains(&area.id),
        }
    }
}

/// Conjunction of predicates. An empty filter matches every area.
///
/// # Examples
/// ```
/// use neighborfit_core::{Predicate, StructuralFilter, Walkability};
///
/// let filter = StructuralFilter::new()
///     .with(Predicate::Walkability(Walkability::High))
///     .with(Predicate::SchoolsNearby);
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuralFilter {
    predicates: Vec<Predicate>,
}

impl StructuralFilter {
    /// Create a filter with no predicates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Append a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Append a predicate while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.push(predicate);
        self
    }

    /// Append a predicate when `predicate` is `Some`.
    #[must_use]
    pub fn with_opt(mut self, predicate: Option<Predicate>) -> Self {
        if let Some(p) = predicate {
            self.push(p);
        }
        self
    }

    /// Predicates in insertion order.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Number of predicates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the filter has no predicates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether `area` satisfies every predicate.
    #[must_use]
    pub fn matches(&self, area: &Area) -> bool {
        self.predicates.iter().all(|p| p.matches(area))
    }
}

fn city_predicate(city: Option<&str>) -> Option<Predicate> {
    city.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| Predicate::CityContains(c.to_owned()))
}

/// Convert a preference profile into a structural filter.
///
/// Each predicate is included only when the profile constrains it:
/// a concrete type or walkability, a pet or transport requirement,
/// `minParks > 0`, schools required, `minSafetyScore > 0`, and a
/// non-blank `city`.
///
/// # Examples
/// ```
/// use neighborfit_core::{PreferenceProfile, Predicate, build_criteria};
///
/// let profile = PreferenceProfile::default();
/// let filter = build_criteria(&profile, Some("pune"));
/// assert_eq!(
///     filter.predicates(),
///     &[
///         Predicate::MinSafetyScore(50),
///         Predicate::CityContains("pune".into()),
///     ]
/// );
/// ```
#[must_use]
pub fn build_criteria(profile: &PreferenceProfile, city: Option<&str>) -> StructuralFilter {
    StructuralFilter::new()
        .with_opt(profile.desired_type.required().map(Predicate::Kind))
        .with_opt(
            profile
                .desired_walkability
                .required()
                .map(Predicate::Walkability),
        )
        .with_opt(profile.pet_friendly.required().map(Predicate::PetFriendly))
        .with_opt(
            profile
                .public_transport
                .required()
                .map(Predicate::PublicTransport),
        )
        .with_opt((profile.min_parks > 0).then_some(Predicate::MinParks(profile.min_parks)))
        .with_opt(
            profile
                .require_schools_nearby
                .then_some(Predicate::SchoolsNearby),
        )
        .with_opt(
            (profile.min_safety_score > 0)
                .then_some(Predicate::MinSafetyScore(profile.min_safety_score)),
        )
        .with_opt(city_predicate(city))
}

/// Area attribute used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// City name.
    #[default]
    City,
    /// Area name.
    Name,
    /// Population.
    Population,
    /// Derived safety score.
    SafetyScore,
    /// Derived lifestyle score.
    LifestyleScore,
    /// Violent crime rate.
    CrimeRate,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "city" => Ok(Self::City),
            "name" => Ok(Self::Name),
            "population" => Ok(Self::Population),
            "safetyscore" | "safety" => Ok(Self::SafetyScore),
            "lifestylescore" | "lifestyle" => Ok(Self::LifestyleScore),
            "crimerate" => Ok(Self::CrimeRate),
            _ => Err(format!("unknown sort key '{s}'")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("unknown sort order '{s}'")),
        }
    }
}

/// Ordering requested from the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AreaOrder {
    /// Single attribute in the given direction.
    Field {
        /// Attribute to sort by.
        key: SortKey,
        /// Sort direction.
        direction: SortDirection,
    },
    /// Safety score descending, then lifestyle score descending.
    SafetyThenLifestyle,
}

impl AreaOrder {
    /// Compare two areas under this ordering.
    #[must_use]
    pub fn compare(&self, a: &Area, b: &Area) -> Ordering {
        match self {
            Self::SafetyThenLifestyle => b
                .safety_score()
                .cmp(&a.safety_score())
                .then_with(|| b.lifestyle_score().cmp(&a.lifestyle_score())),
            Self::Field { key, direction } => {
                let ascending = compare_key(*key, a, b);
                match direction {
                    SortDirection::Ascending => ascending,
                    SortDirection::Descending => ascending.reverse(),
                }
            }
        }
    }
}

fn compare_key(key: SortKey, a: &Area, b: &Area) -> Ordering {
    let (x, y) = (&a.attributes, &b.attributes);
    match key {
        SortKey::City => x.city.cmp(&y.city),
        SortKey::Name => x.name.cmp(&y.name),
        SortKey::Population => x.population.cmp(&y.population),
        SortKey::SafetyScore => a.safety_score().cmp(&b.safety_score()),
        SortKey::LifestyleScore => a.lifestyle_score().cmp(&b.lifestyle_score()),
        SortKey::CrimeRate => x.violent_crime_rate.total_cmp(&y.violent_crime_rate),
    }
}

/// Default safety floor for anonymous matching.
pub const ANONYMOUS_MIN_SAFETY_SCORE: u8 = 50;

/// Criteria for matching without a stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnonymousQuery {
    /// City substring.
    pub city: Option<String>,
    /// Required area type.
    #[serde(rename = "type")]
    pub kind: Option<AreaKind>,
    /// Required walkability.
    pub walkability: Option<Walkability>,
    /// Required pet-friendliness.
    pub pet_friendly: Option<bool>,
    /// Required public transport access.
    pub public_transport: Option<bool>,
    /// Safety floor; zero disables it.
    pub min_safety_score: u8,
}

impl Default for AnonymousQuery {
    fn default() -> Self {
        Self {
            city: None,
            kind: None,
            walkability: None,
            pet_friendly: None,
            public_transport: None,
            min_safety_score: ANONYMOUS_MIN_SAFETY_SCORE,
        }
    }
}

impl AnonymousQuery {
    /// Build the equivalent structural filter.
    #[must_use]
    pub fn to_filter(&self) -> StructuralFilter {
        StructuralFilter::new()
            .with_opt(city_predicate(self.city.as_deref()))
            .with_opt(self.kind.map(Predicate::Kind))
            .with_opt(self.walkability.map(Predicate::Walkability))
            .with_opt(self.pet_friendly.map(Predicate::PetFriendly))
            .with_opt(self.public_transport.map(Predicate::PublicTransport))
            .with_opt(
                (self.min_safety_score > 0)
                    .then_some(Predicate::MinSafetyScore(self.min_safety_score)),
            )
    }
}

/// Attribute search over the whole population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    /// City substring.
    pub city: Option<String>,
    /// Required area type.
    #[serde(rename = "type")]
    pub kind: Option<AreaKind>,
    /// Required walkability.
    pub walkability: Option<Walkability>,
    /// Required pet-friendliness.
    pub pet_friendly: Option<bool>,
    /// Required public transport access.
    pub public_transport: Option<bool>,
    /// Minimum park count; zero disables it.
    pub min_parks: Option<u32>,
    /// Require at least one school.
    pub schools_nearby: bool,
    /// Safety floor; zero disables it.
    pub min_safety_score: Option<u8>,
    /// Maximum violent crime rate.
    pub max_crime_rate: Option<f64>,
    /// Sort key.
    pub sort_by: SortKey,
    /// Sort direction.
    pub order: SortDirection,
}

impl SearchQuery {
    /// Build the equivalent structural filter.
    #[must_use]
    pub fn to_filter(&self) -> StructuralFilter {
        StructuralFilter::new()
            .with_opt(city_predicate(self.city.as_deref()))
            .with_opt(self.kind.map(Predicate::Kind))
            .with_opt(self.walkability.map(Predicate::Walkability))
            .with_opt(self.pet_friendly.map(Predicate::PetFriendly))
            .with_opt(self.public_transport.map(Predicate::PublicTransport))
            .with_opt(
                self.min_parks
                    .filter(|parks| *parks > 0)
                    .map(Predicate::MinParks),
            )
            .with_opt(self.schools_nearby.then_some(Predicate::SchoolsNearby))
            .with_opt(
                self.min_safety_score
                    .filter(|score| *score > 0)
                    .map(Predicate::MinSafetyScore),
            )
            .with_opt(self.max_crime_rate.map(Predicate::MaxCrimeRate))
    }

    /// Ordering requested for the results.
    #[must_use]
    pub const fn ordering(&self) -> AreaOrder {
        AreaOrder::Field {
            key: self.sort_by,
            direction: self.order,
        }
    }
}
