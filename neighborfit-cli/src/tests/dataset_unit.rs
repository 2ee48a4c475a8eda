//! Dataset loading and validation tests.

use super::helpers::{DatasetFile, sample_dataset};
use super::*;
use crate::dataset::{load_dataset, require_dataset};
use neighborfit_core::{AccountError, AccountStore};
use rstest::rstest;
use serde_json::json;
use std::time::{Duration, UNIX_EPOCH};

#[rstest]
fn require_dataset_reports_missing_files() {
    let file = DatasetFile::sample();
    let missing = file.dir().join("absent.json");
    let err = require_dataset(&missing).expect_err("missing dataset should error");
    match err {
        CliError::MissingDataset { path } => assert_eq!(path, missing),
        other => panic!("expected MissingDataset, found {other:?}"),
    }
}

#[rstest]
fn require_dataset_rejects_directories() {
    let file = DatasetFile::sample();
    let err = require_dataset(file.dir()).expect_err("directory should be rejected");
    match err {
        CliError::DatasetNotFile { path } => assert_eq!(path, file.dir()),
        other => panic!("expected DatasetNotFile, found {other:?}"),
    }
}

#[rstest]
#[case::truncated(b"{ \"areas\": [".as_slice())]
#[case::wrong_shape(b"[1, 2, 3]".as_slice())]
#[case::chargesheet_out_of_range(
    br#"{"areas":[{"id":1,"city":"Pune","name":"Baner","type":"Urban","population":1,
    "violentCrimeCount":1.0,"violentCrimeRate":1.0,"chargesheetingRate":150.0,
    "publicTransportAccess":true,"parkCount":0,"schoolCount":0,"petFriendly":false,
    "walkability":"Low"}]}"#
        .as_slice()
)]
fn load_dataset_reports_malformed_json(#[case] contents: &[u8]) {
    let file = DatasetFile::with_contents(contents);
    let err = load_dataset(file.path()).expect_err("malformed dataset should error");
    match err {
        CliError::ParseDataset { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected ParseDataset, found {other:?}"),
    }
}

#[rstest]
fn empty_document_loads_as_empty_dataset() {
    let file = DatasetFile::with_contents(b"{}");
    let dataset = load_dataset(file.path()).expect("empty object is a valid dataset");
    assert!(dataset.areas.is_empty());
    assert!(dataset.users.is_empty());
}

#[rstest]
fn favourites_keep_their_timestamp() {
    let file = DatasetFile::sample();
    let service = load_dataset(file.path())
        .expect("load sample")
        .into_service()
        .expect("build service");
    let favorites = service
        .accounts()
        .favorites(7)
        .expect("in-memory store is infallible")
        .expect("user 7 is registered");
    let [favorite] = favorites.as_slice() else {
        panic!("expected one favourite, found {favorites:?}");
    };
    assert_eq!(favorite.area_id(), 1);
    assert_eq!(
        favorite.added_at,
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    );
}

#[rstest]
fn unknown_favourite_areas_are_rejected() {
    let mut dataset = sample_dataset();
    *dataset
        .pointer_mut("/users/0/favorites")
        .expect("sample favourites") = json!([{ "areaId": 99 }]);
    let file = DatasetFile::from_value(&dataset);
    let err = load_dataset(file.path())
        .expect("dataset decodes")
        .into_service()
        .expect_err("unknown favourite should be rejected");
    match err {
        CliError::UnknownFavoriteArea { user, area } => {
            assert_eq!(user, 7);
            assert_eq!(area, 99);
        }
        other => panic!("expected UnknownFavoriteArea, found {other:?}"),
    }
}

#[rstest]
fn duplicate_favourites_are_rejected() {
    let mut dataset = sample_dataset();
    *dataset
        .pointer_mut("/users/0/favorites")
        .expect("sample favourites") = json!([{ "areaId": 1 }, { "areaId": 1 }]);
    let file = DatasetFile::from_value(&dataset);
    let err = load_dataset(file.path())
        .expect("dataset decodes")
        .into_service()
        .expect_err("duplicate favourite should be rejected");
    match err {
        CliError::Account(AccountError::DuplicateFavorite { user, area }) => {
            assert_eq!((user, area), (7, 1));
        }
        other => panic!("expected DuplicateFavorite, found {other:?}"),
    }
}
