//! Area builders shared by the core integration tests.

use neighborfit_core::{Area, AreaAttributes, AreaKind, Walkability};

/// Raw attributes with every switch off and the given crime figures.
pub fn attributes(violent_crime_rate: f64, chargesheeting_rate: f64) -> AreaAttributes {
    AreaAttributes {
        city: "Bengaluru".into(),
        name: "Indiranagar".into(),
        kind: AreaKind::Urban,
        population: 250_000,
        violent_crime_count: 120.0,
        violent_crime_rate,
        chargesheeting_rate,
        public_transport_access: false,
        park_count: 0,
        school_count: 0,
        pet_friendly: false,
        walkability: Walkability::Low,
        average_rent: None,
        average_home_price: None,
    }
}

/// Validated area built from [`attributes`].
pub fn area(id: u64, violent_crime_rate: f64, chargesheeting_rate: f64) -> Area {
    Area::new(id, attributes(violent_crime_rate, chargesheeting_rate))
        .unwrap_or_else(|err| panic!("fixture area {id} is invalid: {err}"))
}
