//! Test helpers for writing datasets to disk and driving commands.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Four areas and two users; user 7's only favourite is Baner.
///
/// Derived scores: Baner 70/65, Kothrud 55/55, Andheri 20/0, Aundh 68/60.
pub(super) fn sample_dataset() -> Value {
    json!({
        "areas": [
            area(1, ["Pune", "Baner", "Suburban", "High"], [20.0, 60.0], [true, false], [3, 2]),
            area(2, ["Pune", "Kothrud", "Urban", "Medium"], [30.0, 40.0], [true, true], [1, 1]),
            area(3, ["Mumbai", "Andheri", "Urban", "Low"], [80.0, 20.0], [false, false], [0, 0]),
            area(4, ["Pune", "Aundh", "Suburban", "High"], [25.0, 60.0], [true, false], [2, 2]),
        ],
        "users": [
            { "id": 7, "favorites": [{ "areaId": 1, "addedAt": 1_700_000_000 }] },
            { "id": 8 }
        ]
    })
}

fn area(
    id: u64,
    [city, name, kind, walkability]: [&str; 4],
    [crime_rate, chargesheeting]: [f64; 2],
    [transport, pets]: [bool; 2],
    [parks, schools]: [u32; 2],
) -> Value {
    json!({
        "id": id,
        "city": city,
        "name": name,
        "type": kind,
        "population": 100_000,
        "violentCrimeCount": 120.0,
        "violentCrimeRate": crime_rate,
        "chargesheetingRate": chargesheeting,
        "publicTransportAccess": transport,
        "parkCount": parks,
        "schoolCount": schools,
        "petFriendly": pets,
        "walkability": walkability,
        "averageRent": 20_000.0
    })
}

/// A dataset written to a temporary directory.
#[derive(Debug)]
pub(super) struct DatasetFile {
    dir: TempDir,
    path: Utf8PathBuf,
}

impl DatasetFile {
    pub(super) fn with_contents(contents: &[u8]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("dataset.json"))
            .expect("utf-8 temp path");
        fs::write(&path, contents).expect("write dataset");
        Self { dir, path }
    }

    pub(super) fn from_value(dataset: &Value) -> Self {
        let payload = serde_json::to_vec(dataset).expect("encode dataset");
        Self::with_contents(&payload)
    }

    pub(super) fn sample() -> Self {
        Self::from_value(&sample_dataset())
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn dir(&self) -> &Utf8Path {
        Utf8Path::from_path(self.dir.path()).expect("utf-8 temp dir")
    }
}

/// Parse `args` as a command line and run it, decoding the JSON output.
pub(super) fn run_cli(args: &[&str]) -> Result<Value, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("neighborfit").chain(args.iter().copied()))?;
    let mut output = Vec::new();
    run_with(cli, &mut output)?;
    Ok(serde_json::from_slice(&output).expect("command output is JSON"))
}

/// Identities of the areas in a JSON array of areas or match results.
pub(super) fn area_ids(values: &Value) -> Vec<u64> {
    values
        .as_array()
        .expect("array output")
        .iter()
        .map(|entry| {
            entry
                .get("area")
                .unwrap_or(entry)
                .get("id")
                .and_then(Value::as_u64)
                .expect("area id")
        })
        .collect()
}
