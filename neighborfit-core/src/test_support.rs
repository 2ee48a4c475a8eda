//! Area fixtures shared by unit, behaviour and property tests.

use crate::{Area, AreaAttributes, AreaId, AreaKind, Walkability};

/// Attributes deriving `safetyScore = 70` and `lifestyleScore = 65`.
#[must_use]
pub fn sample_attributes() -> AreaAttributes {
    AreaAttributes {
        city: "Pune".into(),
        name: "Baner".into(),
        kind: AreaKind::Suburban,
        population: 120_000,
        violent_crime_count: 40.0,
        violent_crime_rate: 20.0,
        chargesheeting_rate: 60.0,
        public_transport_access: true,
        park_count: 3,
        school_count: 2,
        pet_friendly: false,
        walkability: Walkability::High,
        average_rent: None,
        average_home_price: None,
    }
}

/// [`sample_attributes`] wrapped in an [`Area`] with the given identity.
#[must_use]
pub fn sample_area(id: AreaId) -> Area {
    Area {
        id,
        attributes: sample_attributes(),
    }
}

/// An area whose derived scores equal `safety` and `lifestyle`.
///
/// Lifestyle points come in steps of five, so `lifestyle` is rounded down
/// to the nearest multiple of five.
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::float_arithmetic,
    reason = "fixture inverts the score formulas"
)]
pub fn area_with_scores(id: AreaId, safety: u8, lifestyle: u8) -> Area {
    let safety_pct = f64::from(safety.min(100));
    Area {
        id,
        attributes: AreaAttributes {
            name: format!("Area {id}"),
            violent_crime_rate: 100.0 - safety_pct,
            chargesheeting_rate: safety_pct,
            public_transport_access: false,
            pet_friendly: false,
            walkability: Walkability::Low,
            park_count: u32::from(lifestyle.min(100)) / 5,
            school_count: 0,
            ..sample_attributes()
        },
    }
}
