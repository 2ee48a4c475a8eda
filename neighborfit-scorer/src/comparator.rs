//! Side-by-side comparison of a small set of areas.

use std::collections::HashSet;

use log::warn;
use neighborfit_core::{Area, AreaId, ValidationError, Walkability};
use serde::Serialize;

/// Metrics shown for one area in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaMetrics {
    /// Resident population.
    pub population: u64,
    /// Violent crimes per 100,000 residents.
    pub crime_rate: f64,
    /// Derived safety score.
    pub safety_score: u8,
    /// Derived lifestyle score.
    pub lifestyle_score: u8,
    /// Number of parks.
    pub parks: u32,
    /// Number of schools.
    pub schools: u32,
    /// Walkability level.
    pub walkability: Walkability,
    /// Whether the area is pet friendly.
    pub pet_friendly: bool,
    /// Whether public transport is available.
    pub public_transport: bool,
}

/// An area's identity, labels and metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Area identity.
    pub id: AreaId,
    /// Area name.
    pub name: String,
    /// City name.
    pub city: String,
    /// `"<name>, <city>"`.
    pub full_location: String,
    /// Compared metrics.
    pub metrics: AreaMetrics,
}

impl From<&Area> for MetricsSnapshot {
    fn from(area: &Area) -> Self {
        let attributes = &area.attributes;
        let scores = area.scores();
        Self {
            id: area.id,
            name: attributes.name.clone(),
            city: attributes.city.clone(),
            full_location: area.full_location(),
            metrics: AreaMetrics {
                population: attributes.population,
                crime_rate: attributes.violent_crime_rate,
                safety_score: scores.safety,
                lifestyle_score: scores.lifestyle,
                parks: attributes.park_count,
                schools: attributes.school_count,
                walkability: attributes.walkability,
                pet_friendly: attributes.pet_friendly,
                public_transport: attributes.public_transport_access,
            },
        }
    }
}

/// Per-area metrics plus the winner on each headline axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// One snapshot per distinct area, in input order.
    pub per_area: Vec<MetricsSnapshot>,
    /// Highest safety score.
    pub best_safety: MetricsSnapshot,
    /// Highest lifestyle score.
    pub best_lifestyle: MetricsSnapshot,
    /// Every area with high walkability, in input order.
    pub most_walkable: Vec<MetricsSnapshot>,
    /// Every pet-friendly area, in input order.
    pub pet_friendly: Vec<MetricsSnapshot>,
}

/// Compare `areas`, naming the best area per axis.
///
/// Repeated identities are collapsed to their first occurrence. On a tie
/// the area appearing first wins.
///
/// # Errors
/// Returns [`ValidationError::TooFewAreas`] when fewer than two distinct
/// areas are supplied.
pub fn compare(areas: &[Area]) -> Result<Comparison, ValidationError> {
    let mut seen = HashSet::new();
    let per_area: Vec<MetricsSnapshot> = areas
        .iter()
        .filter(|a| seen.insert(a.id))
        .map(MetricsSnapshot::from)
        .collect();
    if per_area.len() < areas.len() {
        warn!(
            "ignoring {} repeated area(s) in comparison",
            areas.len() - per_area.len()
        );
    }

    let too_few = ValidationError::TooFewAreas {
        supplied: per_area.len(),
    };
    if per_area.len() < 2 {
        return Err(too_few);
    }
    let (Some(best_safety), Some(best_lifestyle)) = (
        first_max_by_key(&per_area, |m| m.metrics.safety_score),
        first_max_by_key(&per_area, |m| m.metrics.lifestyle_score),
    ) else {
        return Err(too_few);
    };

    Ok(Comparison {
        best_safety: best_safety.clone(),
        best_lifestyle: best_lifestyle.clone(),
        most_walkable: select(&per_area, |m| m.metrics.walkability == Walkability::High),
        pet_friendly: select(&per_area, |m| m.metrics.pet_friendly),
        per_area,
    })
}

fn select(
    snapshots: &[MetricsSnapshot],
    keep: impl Fn(&MetricsSnapshot) -> bool,
) -> Vec<MetricsSnapshot> {
    snapshots.iter().filter(|m| keep(m)).cloned().collect()
}

/// `Iterator::max_by_key` keeps the last maximum; comparisons favour the
/// first.
fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    let mut iter = items.iter();
    let mut best = iter.next()?;
    let mut best_key = key(best);
    for item in iter {
        let candidate = key(item);
        if candidate > best_key {
            best = item;
            best_key = candidate;
        }
    }
    Some(best)
}
