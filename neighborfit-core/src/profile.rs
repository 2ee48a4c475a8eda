//! Per-user preference profiles and match weights.
//!
//! A [`PreferenceProfile`] is created with defaults when a user registers
//! and is only changed through [`PreferenceProfile::apply`], which merges a
//! [`PreferenceUpdate`] and validates the result as a whole.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{AreaKind, ValidationError, Walkability};

/// Accepted deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Slack absorbing float error so sums of exactly `1.0 ± 0.01` pass.
const WEIGHT_SUM_SLACK: f64 = 1e-9;

/// A preference that may be left open.
///
/// Serialises as `null` when open and as the bare value otherwise. The
/// keyword `"Any"` is accepted on input as an open preference.
///
/// # Examples
/// ```
/// use neighborfit_core::Preference;
///
/// let pets: Preference<bool> = Preference::Only(true);
/// assert!(pets.accepts(&true));
/// assert!(!pets.accepts(&false));
/// assert!(Preference::<bool>::Any.accepts(&false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preference<T> {
    /// No preference.
    #[default]
    Any,
    /// Only this value is acceptable.
    Only(T),
}

impl<T: PartialEq> Preference<T> {
    /// Whether `value` satisfies the preference.
    #[must_use]
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: Copy> Preference<T> {
    /// The required value, if one was declared.
    #[must_use]
    pub const fn required(&self) -> Option<T> {
        match self {
            Self::Any => None,
            Self::Only(value) => Some(*value),
        }
    }
}

impl<T> From<Option<T>> for Preference<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Any, Self::Only)
    }
}

impl<T: Serialize> Serialize for Preference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_none(),
            Self::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Preference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Value(T),
            Keyword(Option<String>),
        }

        match Raw::<T>::deserialize(deserializer)? {
            Raw::Value(value) => Ok(Self::Only(value)),
            Raw::Keyword(None) => Ok(Self::Any),
            Raw::Keyword(Some(keyword)) if keyword.eq_ignore_ascii_case("any") => Ok(Self::Any),
            Raw::Keyword(Some(keyword)) => Err(D::Error::custom(format!(
                "unrecognised preference '{keyword}'"
            ))),
        }
    }
}

/// Relative importance of the four match axes.
///
/// Every weight lies in `[0.0, 1.0]` and the four sum to 1.0 within
/// [`WEIGHT_SUM_TOLERANCE`]. Instances can only be obtained through
/// [`Weights::new`] (or deserialisation, which calls it), so a `Weights`
/// value is always valid.
///
/// # Examples
/// ```
/// use neighborfit_core::Weights;
///
/// assert!(Weights::new(0.4, 0.3, 0.2, 0.1).is_ok());
/// assert!(Weights::new(0.5, 0.5, 0.5, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights", into = "RawWeights")]
pub struct Weights {
    safety: f64,
    lifestyle: f64,
    affordability: f64,
    walkability: f64,
}

impl Weights {
    /// Validate and construct a weight set.
    ///
    /// # Errors
    /// Returns [`ValidationError::WeightOutOfRange`] for a weight outside
    /// `[0.0, 1.0]` and [`ValidationError::WeightsDoNotSumToOne`] when the
    /// total strays from 1.0 by more than the tolerance.
    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums the four weights"
    )]
    pub fn new(
        safety: f64,
        lifestyle: f64,
        affordability: f64,
        walkability: f64,
    ) -> Result<Self, ValidationError> {
        for (name, value) in [
            ("safety", safety),
            ("lifestyle", lifestyle),
            ("affordability", affordability),
            ("walkability", walkability),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::WeightOutOfRange { name, value });
            }
        }
        let sum = safety + lifestyle + affordability + walkability;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE + WEIGHT_SUM_SLACK {
            return Err(ValidationError::WeightsDoNotSumToOne {
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }
        Ok(Self {
            safety,
            lifestyle,
            affordability,
            walkability,
        })
    }

    /// Weight of the safety term.
    #[must_use]
    pub const fn safety(&self) -> f64 {
        self.safety
    }

    /// Weight of the lifestyle term.
    #[must_use]
    pub const fn lifestyle(&self) -> f64 {
        self.lifestyle
    }

    /// Weight of the affordability term.
    #[must_use]
    pub const fn affordability(&self) -> f64 {
        self.affordability
    }

    /// Weight of the walkability term.
    #[must_use]
    pub const fn walkability(&self) -> f64 {
        self.walkability
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            safety: 0.3,
            lifestyle: 0.3,
            affordability: 0.2,
            walkability: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawWeights {
    safety: f64,
    lifestyle: f64,
    affordability: f64,
    walkability: f64,
}

impl TryFrom<RawWeights> for Weights {
    type Error = ValidationError;

    fn try_from(raw: RawWeights) -> Result<Self, Self::Error> {
        Self::new(raw.safety, raw.lifestyle, raw.affordability, raw.walkability)
    }
}

impl From<Weights> for RawWeights {
    fn from(weights: Weights) -> Self {
        Self {
            safety: weights.safety,
            lifestyle: weights.lifestyle,
            affordability: weights.affordability,
            walkability: weights.walkability,
        }
    }
}

/// Default minimum safety score for new profiles.
pub const DEFAULT_MIN_SAFETY_SCORE: u8 = 50;

/// What a user is looking for in an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawProfile")]
pub struct PreferenceProfile {
    /// Desired settlement category.
    pub desired_type: Preference<AreaKind>,
    /// Desired walkability level.
    pub desired_walkability: Preference<Walkability>,
    /// Pet-friendliness requirement.
    pub pet_friendly: Preference<bool>,
    /// Public transport requirement.
    pub public_transport: Preference<bool>,
    /// Minimum acceptable safety score, `0..=100`.
    pub min_safety_score: u8,
    /// Monthly rent budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rent: Option<f64>,
    /// Home purchase budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_home_price: Option<f64>,
    /// Minimum number of parks.
    pub min_parks: u32,
    /// Whether at least one school is required.
    pub require_schools_nearby: bool,
    /// Match weights.
    pub weights: Weights,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            desired_type: Preference::Any,
            desired_walkability: Preference::Any,
            pet_friendly: Preference::Any,
            public_transport: Preference::Any,
            min_safety_score: DEFAULT_MIN_SAFETY_SCORE,
            max_rent: None,
            max_home_price: None,
            min_parks: 0,
            require_schools_nearby: false,
            weights: Weights::default(),
        }
    }
}

impl PreferenceProfile {
    /// Check the fields [`Weights`] does not already guarantee.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_safety_score > 100 {
            return Err(ValidationError::MinSafetyOutOfRange(self.min_safety_score));
        }
        for (name, budget) in [
            ("maxRent", self.max_rent),
            ("maxHomePrice", self.max_home_price),
        ] {
            if let Some(value) = budget
                && (!value.is_finite() || value < 0.0)
            {
                return Err(ValidationError::InvalidBudget { name, value });
            }
        }
        Ok(())
    }

    /// Merge `update` over this profile and validate the result.
    ///
    /// The receiver is left untouched; callers store the returned profile.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when the merged profile is invalid.
    ///
    /// # Examples
    /// ```
    /// use neighborfit_core::{Preference, PreferenceProfile, PreferenceUpdate, Walkability};
    ///
    /// let profile = PreferenceProfile::default();
    /// let update = PreferenceUpdate {
    ///     desired_walkability: Some(Preference::Only(Walkability::High)),
    ///     min_parks: Some(2),
    ///     ..PreferenceUpdate::default()
    /// };
    /// let updated = profile.apply(update).expect("valid update");
    /// assert_eq!(updated.min_parks, 2);
    /// assert_eq!(profile.min_parks, 0);
    /// ```
    pub fn apply(&self, update: PreferenceUpdate) -> Result<Self, ValidationError> {
        let merged = Self {
            desired_type: update.desired_type.unwrap_or(self.desired_type),
            desired_walkability: update
                .desired_walkability
                .unwrap_or(self.desired_walkability),
            pet_friendly: update.pet_friendly.unwrap_or(self.pet_friendly),
            public_transport: update.public_transport.unwrap_or(self.public_transport),
            min_safety_score: update.min_safety_score.unwrap_or(self.min_safety_score),
            max_rent: update.max_rent.unwrap_or(self.max_rent),
            max_home_price: update.max_home_price.unwrap_or(self.max_home_price),
            min_parks: update.min_parks.unwrap_or(self.min_parks),
            require_schools_nearby: update
                .require_schools_nearby
                .unwrap_or(self.require_schools_nearby),
            weights: match update.weights {
                Some(raw) => Weights::try_from(raw)?,
                None => self.weights,
            },
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// Wire shape of a stored profile. Weights carry no default and must be
/// present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    #[serde(default)]
    desired_type: Preference<AreaKind>,
    #[serde(default)]
    desired_walkability: Preference<Walkability>,
    #[serde(default)]
    pet_friendly: Preference<bool>,
    #[serde(default)]
    public_transport: Preference<bool>,
    #[serde(default = "default_min_safety_score")]
    min_safety_score: u8,
    #[serde(default)]
    max_rent: Option<f64>,
    #[serde(default)]
    max_home_price: Option<f64>,
    #[serde(default)]
    min_parks: u32,
    #[serde(default)]
    require_schools_nearby: bool,
    weights: Weights,
}

const fn default_min_safety_score() -> u8 {
    DEFAULT_MIN_SAFETY_SCORE
}

impl TryFrom<RawProfile> for PreferenceProfile {
    type Error = ValidationError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let profile = Self {
            desired_type: raw.desired_type,
            desired_walkability: raw.desired_walkability,
            pet_friendly: raw.pet_friendly,
            public_transport: raw.public_transport,
            min_safety_score: raw.min_safety_score,
            max_rent: raw.max_rent,
            max_home_price: raw.max_home_price,
            min_parks: raw.min_parks,
            require_schools_nearby: raw.require_schools_nearby,
            weights: raw.weights,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Partial change to a [`PreferenceProfile`].
///
/// An absent field keeps the current value. A field present as `null`
/// clears it: budgets become `Some(None)` and tri-state preferences become
/// `Some(Preference::Any)`. Weights are supplied unvalidated and checked
/// when the update is applied.
///
/// # Examples
/// ```
/// use neighborfit_core::{Preference, PreferenceUpdate};
///
/// let update: PreferenceUpdate =
///     serde_json::from_str(r#"{"maxRent": null, "petFriendly": null}"#).expect("valid update");
/// assert_eq!(update.max_rent, Some(None));
/// assert_eq!(update.pet_friendly, Some(Preference::Any));
/// assert_eq!(update.max_home_price, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceUpdate {
    /// New desired settlement category.
    #[serde(deserialize_with = "present")]
    pub desired_type: Option<Preference<AreaKind>>,
    /// New desired walkability.
    #[serde(deserialize_with = "present")]
    pub desired_walkability: Option<Preference<Walkability>>,
    /// New pet-friendliness requirement.
    #[serde(deserialize_with = "present")]
    pub pet_friendly: Option<Preference<bool>>,
    /// New public transport requirement.
    #[serde(deserialize_with = "present")]
    pub public_transport: Option<Preference<bool>>,
    /// New minimum safety score.
    pub min_safety_score: Option<u8>,
    /// New rent budget; `Some(None)` clears it.
    #[serde(deserialize_with = "present")]
    pub max_rent: Option<Option<f64>>,
    /// New home price budget; `Some(None)` clears it.
    #[serde(deserialize_with = "present")]
    pub max_home_price: Option<Option<f64>>,
    /// New minimum park count.
    pub min_parks: Option<u32>,
    /// New school requirement.
    pub require_schools_nearby: Option<bool>,
    /// Replacement weights.
    pub weights: Option<WeightsInput>,
}

/// Mark a field that appeared in the document, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Unvalidated weights carried by a [`PreferenceUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeightsInput {
    /// Safety weight.
    pub safety: f64,
    /// Lifestyle weight.
    pub lifestyle: f64,
    /// Affordability weight.
    pub affordability: f64,
    /// Walkability weight.
    pub walkability: f64,
}

impl TryFrom<WeightsInput> for Weights {
    type Error = ValidationError;

    fn try_from(raw: WeightsInput) -> Result<Self, Self::Error> {
        Self::new(raw.safety, raw.lifestyle, raw.affordability, raw.walkability)
    }
}
