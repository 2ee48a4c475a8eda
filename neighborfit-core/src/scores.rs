//! Derived quality metrics for an area.
//!
//! [`derive_scores`] is the single source of the safety and lifestyle
//! scores. It is pure and total: attributes are validated when an
//! [`Area`](crate::Area) is materialised, so there is no error path here.

use serde::{Deserialize, Serialize};

use crate::AreaAttributes;

/// Points added to the lifestyle score when public transport is available.
pub const TRANSPORT_POINTS: u32 = 20;
/// Points added to the lifestyle score for pet-friendly areas.
pub const PET_POINTS: u32 = 15;
/// Points added to the lifestyle score per park.
pub const PARK_POINTS: u32 = 5;
/// Points added to the lifestyle score per school.
pub const SCHOOL_POINTS: u32 = 5;

/// Upper bound of every 0–100 metric.
pub const SCORE_CEILING: u8 = 100;

/// Snap distance applied before rounding so accumulated float error such
/// as `60.499999999` still rounds as `60.5`.
const ROUNDING_SNAP: f64 = 1e-6;

/// Safety and lifestyle scores derived from raw attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedScores {
    /// Safety score in `0..=100`.
    pub safety: u8,
    /// Lifestyle score in `0..=100`.
    pub lifestyle: u8,
}

/// Compute both derived scores for `attributes`.
///
/// # Examples
/// ```
/// use neighborfit_core::{AreaAttributes, AreaKind, Walkability, derive_scores};
///
/// let attributes = AreaAttributes {
///     city: "Pune".into(),
///     name: "Baner".into(),
///     kind: AreaKind::Suburban,
///     population: 120_000,
///     violent_crime_count: 40.0,
///     violent_crime_rate: 20.0,
///     chargesheeting_rate: 60.0,
///     public_transport_access: true,
///     park_count: 3,
///     school_count: 2,
///     pet_friendly: false,
///     walkability: Walkability::High,
///     average_rent: None,
///     average_home_price: None,
/// };
/// let scores = derive_scores(&attributes);
/// assert_eq!(scores.safety, 70);
/// assert_eq!(scores.lifestyle, 65);
/// ```
#[must_use]
pub fn derive_scores(attributes: &AreaAttributes) -> DerivedScores {
    DerivedScores {
        safety: safety_score(attributes),
        lifestyle: lifestyle_score(attributes),
    }
}

/// `round((max(0, 100 - violentCrimeRate) + chargesheetingRate) / 2)`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "safety score averages two percentage-like terms"
)]
pub fn safety_score(attributes: &AreaAttributes) -> u8 {
    let crime_term = (100.0 - attributes.violent_crime_rate).max(0.0);
    let raw = (crime_term + attributes.chargesheeting_rate) / 2.0;
    to_score(round_half_up(raw))
}

/// Amenity points capped at 100.
#[must_use]
pub fn lifestyle_score(attributes: &AreaAttributes) -> u8 {
    let mut points = 0_u32;
    if attributes.public_transport_access {
        points += TRANSPORT_POINTS;
    }
    if attributes.pet_friendly {
        points += PET_POINTS;
    }
    points = points
        .saturating_add(attributes.park_count.saturating_mul(PARK_POINTS))
        .saturating_add(attributes.school_count.saturating_mul(SCHOOL_POINTS))
        .saturating_add(attributes.walkability.lifestyle_bonus());
    let capped = points.min(u32::from(SCORE_CEILING));
    u8::try_from(capped).unwrap_or(SCORE_CEILING)
}

/// Round to the nearest integer with ties going up.
///
/// Values are snapped to a micro-unit grid first so that products such as
/// `0.3 * 65.0` land on their decimal value before the tie check.
///
/// # Examples
/// ```
/// use neighborfit_core::round_half_up;
///
/// assert_eq!(round_half_up(60.5), 61.0);
/// assert_eq!(round_half_up(60.499_999_999_9), 61.0);
/// assert_eq!(round_half_up(60.4), 60.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rounding is inherently floating point"
)]
pub fn round_half_up(value: f64) -> f64 {
    let snapped = (value / ROUNDING_SNAP).round() * ROUNDING_SNAP;
    (snapped + 0.5).floor()
}

/// Clamp a rounded value into `0..=100` and narrow it.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped into 0..=100 before the cast"
)]
pub fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, f64::from(SCORE_CEILING)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_attributes;
    use crate::Walkability;
    use rstest::rstest;

    #[rstest]
    #[case(20.0, 60.0, 70)]
    #[case(0.0, 100.0, 100)]
    #[case(150.0, 0.0, 0)]
    #[case(150.0, 41.0, 21)]
    #[case(21.0, 60.0, 70)] // 69.5 rounds up
    fn safety_cases(#[case] rate: f64, #[case] chargesheet: f64, #[case] expected: u8) {
        let mut attributes = sample_attributes();
        attributes.violent_crime_rate = rate;
        attributes.chargesheeting_rate = chargesheet;
        assert_eq!(safety_score(&attributes), expected);
    }

    #[rstest]
    #[case(true, false, 3, 2, Walkability::High, 65)]
    #[case(false, false, 0, 0, Walkability::Low, 0)]
    #[case(true, true, 0, 0, Walkability::Medium, 45)]
    #[case(true, true, 20, 20, Walkability::High, 100)]
    #[case(false, false, u32::MAX, u32::MAX, Walkability::High, 100)]
    fn lifestyle_cases(
        #[case] transport: bool,
        #[case] pets: bool,
        #[case] parks: u32,
        #[case] schools: u32,
        #[case] walkability: Walkability,
        #[case] expected: u8,
    ) {
        let mut attributes = sample_attributes();
        attributes.public_transport_access = transport;
        attributes.pet_friendly = pets;
        attributes.park_count = parks;
        attributes.school_count = schools;
        attributes.walkability = walkability;
        assert_eq!(lifestyle_score(&attributes), expected);
    }

    #[rstest]
    #[case(0.5, 1.0)]
    #[case(1.499_999_999_9, 2.0)]
    #[case(2.4, 2.0)]
    #[case(0.0, 0.0)]
    fn rounds_ties_up(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(round_half_up(input), expected);
    }

    #[rstest]
    #[case(f64::NAN, 0)]
    #[case(-3.0, 0)]
    #[case(250.0, 100)]
    fn to_score_clamps(#[case] input: f64, #[case] expected: u8) {
        assert_eq!(to_score(input), expected);
    }
}
