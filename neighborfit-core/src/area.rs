//! Residential areas and their raw civic attributes.
//!
//! An [`Area`] is a read-only input to the engine. Its derived quality
//! scores are never stored: [`Area::scores`] recomputes them from the raw
//! attributes on every call so they cannot drift out of sync.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scores::{DerivedScores, derive_scores};

/// Identity of an [`Area`].
pub type AreaId = u64;

/// Broad settlement category of an area.
///
/// # Examples
/// ```
/// use neighborfit_core::AreaKind;
///
/// assert_eq!(AreaKind::Suburban.as_str(), "Suburban");
/// assert_eq!("rural".parse::<AreaKind>(), Ok(AreaKind::Rural));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AreaKind {
    /// Dense city districts.
    Urban,
    /// Residential outskirts.
    Suburban,
    /// Countryside settlements.
    Rural,
}

impl AreaKind {
    /// Return the canonical capitalised name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Suburban => "Suburban",
            Self::Rural => "Rural",
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urban" => Ok(Self::Urban),
            "suburban" => Ok(Self::Suburban),
            "rural" => Ok(Self::Rural),
            _ => Err(format!("unknown area type '{s}'")),
        }
    }
}

/// How comfortable an area is to get around on foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Walkability {
    /// Car-dependent.
    Low,
    /// Some daily errands are walkable.
    Medium,
    /// Most daily errands are walkable.
    High,
}

impl Walkability {
    /// Return the canonical capitalised name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Bonus points this level adds to the lifestyle score.
    #[must_use]
    pub const fn lifestyle_bonus(self) -> u32 {
        match self {
            Self::High => 20,
            Self::Medium => 10,
            Self::Low => 0,
        }
    }

    /// Match term for the walkability preference axis, in `0..=100`.
    ///
    /// This is independent of [`Walkability::lifestyle_bonus`].
    #[must_use]
    pub const fn match_term(self) -> u8 {
        match self {
            Self::High => 100,
            Self::Medium => 60,
            Self::Low => 20,
        }
    }
}

impl fmt::Display for Walkability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Walkability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("unknown walkability '{s}'")),
        }
    }
}

/// Raw civic and amenity data for an area, as produced by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAttributes {
    /// City the area belongs to.
    pub city: String,
    /// Area name within the city.
    pub name: String,
    /// Settlement category.
    #[serde(rename = "type")]
    pub kind: AreaKind,
    /// Resident population.
    pub population: u64,
    /// Absolute violent crime count for the reporting period.
    pub violent_crime_count: f64,
    /// Violent crimes per reporting unit of population.
    pub violent_crime_rate: f64,
    /// Share of reported crimes that reached a chargesheet, `0..=100`.
    pub chargesheeting_rate: f64,
    /// Whether public transport serves the area.
    pub public_transport_access: bool,
    /// Number of parks.
    pub park_count: u32,
    /// Number of schools.
    pub school_count: u32,
    /// Whether the area welcomes pets.
    pub pet_friendly: bool,
    /// Walkability level.
    pub walkability: Walkability,
    /// Average monthly rent, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rent: Option<f64>,
    /// Average home price, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_home_price: Option<f64>,
}

/// Errors returned when materialising an [`Area`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AreaError {
    /// A required text field was blank.
    #[error("area {field} must not be blank")]
    BlankField {
        /// Name of the blank field.
        field: &'static str,
    },
    /// A numeric field was negative or not finite.
    #[error("area {field} must be a finite non-negative number, got {value}")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// The chargesheeting rate was outside `0..=100`.
    #[error("chargesheeting rate must be between 0 and 100, got {0}")]
    ChargesheetingOutOfRange(f64),
}

impl AreaAttributes {
    /// Check that every attribute lies within its documented range.
    ///
    /// # Errors
    /// Returns the first [`AreaError`] encountered.
    pub fn validate(&self) -> Result<(), AreaError> {
        if self.city.trim().is_empty() {
            return Err(AreaError::BlankField { field: "city" });
        }
        if self.name.trim().is_empty() {
            return Err(AreaError::BlankField { field: "name" });
        }
        require_non_negative("violentCrimeCount", self.violent_crime_count)?;
        require_non_negative("violentCrimeRate", self.violent_crime_rate)?;
        if !(0.0..=100.0).contains(&self.chargesheeting_rate) {
            return Err(AreaError::ChargesheetingOutOfRange(
                self.chargesheeting_rate,
            ));
        }
        if let Some(rent) = self.average_rent {
            require_non_negative("averageRent", rent)?;
        }
        if let Some(price) = self.average_home_price {
            require_non_negative("averageHomePrice", price)?;
        }
        Ok(())
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), AreaError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AreaError::InvalidNumber { field, value })
    }
}

/// A candidate residential area.
///
/// # Examples
/// ```
/// use neighborfit_core::{Area, AreaAttributes, AreaKind, Walkability};
///
/// # fn main() -> Result<(), neighborfit_core::AreaError> {
/// let area = Area::new(
///     7,
///     AreaAttributes {
///         city: "Pune".into(),
///         name: "Baner".into(),
///         kind: AreaKind::Suburban,
///         population: 120_000,
///         violent_crime_count: 40.0,
///         violent_crime_rate: 20.0,
///         chargesheeting_rate: 60.0,
///         public_transport_access: true,
///         park_count: 3,
///         school_count: 2,
///         pet_friendly: false,
///         walkability: Walkability::High,
///         average_rent: None,
///         average_home_price: None,
///     },
/// )?;
/// assert_eq!(area.safety_score(), 70);
/// assert_eq!(area.lifestyle_score(), 65);
/// assert_eq!(area.full_location(), "Baner, Pune");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AreaRecord", into = "AreaRecord")]
pub struct Area {
    /// Unique identifier.
    pub id: AreaId,
    /// Raw attributes the derived scores are computed from.
    pub attributes: AreaAttributes,
}

impl Area {
    /// Validate `attributes` and construct an [`Area`].
    ///
    /// # Errors
    /// Returns [`AreaError`] when an attribute is out of range.
    pub fn new(id: AreaId, attributes: AreaAttributes) -> Result<Self, AreaError> {
        attributes.validate()?;
        Ok(Self { id, attributes })
    }

    /// Derive the safety and lifestyle scores from the current attributes.
    #[must_use]
    pub fn scores(&self) -> DerivedScores {
        derive_scores(&self.attributes)
    }

    /// Derived safety score in `0..=100`.
    #[must_use]
    pub fn safety_score(&self) -> u8 {
        self.scores().safety
    }

    /// Derived lifestyle score in `0..=100`.
    #[must_use]
    pub fn lifestyle_score(&self) -> u8 {
        self.scores().lifestyle
    }

    /// Display name combining area and city, e.g. `"Baner, Pune"`.
    #[must_use]
    pub fn full_location(&self) -> String {
        format!("{}, {}", self.attributes.name, self.attributes.city)
    }
}

/// Wire shape of an [`Area`]: raw attributes plus the derived scores.
///
/// Derived scores are written on output and ignored on input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AreaRecord {
    id: AreaId,
    #[serde(flatten)]
    attributes: AreaAttributes,
    #[serde(default, skip_deserializing)]
    safety_score: u8,
    #[serde(default, skip_deserializing)]
    lifestyle_score: u8,
}

impl TryFrom<AreaRecord> for Area {
    type Error = AreaError;

    fn try_from(record: AreaRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.attributes)
    }
}

impl From<Area> for AreaRecord {
    fn from(area: Area) -> Self {
        let DerivedScores { safety, lifestyle } = area.scores();
        Self {
            id: area.id,
            attributes: area.attributes,
            safety_score: safety,
            lifestyle_score: lifestyle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_attributes;
    use rstest::rstest;

    #[rstest]
    fn scores_follow_attribute_changes() {
        let mut area = Area::new(1, sample_attributes()).expect("valid area");
        let before = area.safety_score();
        area.attributes.chargesheeting_rate = 100.0;
        assert_ne!(area.safety_score(), before);
        assert_eq!(area.safety_score(), 90);
    }

    #[rstest]
    #[case::blank_city(|a: &mut AreaAttributes| a.city = "  ".into())]
    #[case::negative_rate(|a: &mut AreaAttributes| a.violent_crime_rate = -1.0)]
    #[case::nan_count(|a: &mut AreaAttributes| a.violent_crime_count = f64::NAN)]
    #[case::chargesheet_high(|a: &mut AreaAttributes| a.chargesheeting_rate = 100.5)]
    #[case::negative_rent(|a: &mut AreaAttributes| a.average_rent = Some(-5.0))]
    fn rejects_out_of_range_attributes(#[case] mutate: fn(&mut AreaAttributes)) {
        let mut attributes = sample_attributes();
        mutate(&mut attributes);
        assert!(Area::new(1, attributes).is_err());
    }

    #[rstest]
    fn serialises_derived_scores() {
        let area = Area::new(3, sample_attributes()).expect("valid area");
        let json = serde_json::to_value(&area).expect("serialise area");
        assert_eq!(json["safetyScore"], 70);
        assert_eq!(json["lifestyleScore"], 65);
        assert_eq!(json["type"], "Suburban");
    }

    #[rstest]
    fn ignores_supplied_derived_scores() {
        let area = Area::new(3, sample_attributes()).expect("valid area");
        let mut json = serde_json::to_value(&area).expect("serialise area");
        json["safetyScore"] = serde_json::json!(3);
        let decoded: Area = serde_json::from_value(json).expect("decode area");
        assert_eq!(decoded.safety_score(), 70);
        assert_eq!(decoded, area);
    }

    #[rstest]
    fn deserialisation_validates_attributes() {
        let area = Area::new(3, sample_attributes()).expect("valid area");
        let mut json = serde_json::to_value(&area).expect("serialise area");
        json["chargesheetingRate"] = serde_json::json!(140.0);
        assert!(serde_json::from_value::<Area>(json).is_err());
    }

    #[rstest]
    fn parses_enums_case_insensitively() {
        assert_eq!("HIGH".parse::<Walkability>(), Ok(Walkability::High));
        assert!("sprawling".parse::<AreaKind>().is_err());
    }
}
