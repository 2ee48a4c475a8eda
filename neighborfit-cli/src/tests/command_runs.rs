//! End-to-end runs of each subcommand against a dataset on disk.

use super::helpers::{DatasetFile, area_ids, run_cli};
use super::*;
use neighborfit_core::ValidationError;
use neighborfit_scorer::{EngineError, NotFound};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn dataset() -> DatasetFile {
    DatasetFile::sample()
}

fn run(dataset: &DatasetFile, args: &[&str]) -> Value {
    let mut full: Vec<&str> = args.to_vec();
    full.extend(["--dataset", dataset.path().as_str()]);
    run_cli(&full).expect("command should succeed")
}

fn run_err(dataset: &DatasetFile, args: &[&str]) -> CliError {
    let mut full: Vec<&str> = args.to_vec();
    full.extend(["--dataset", dataset.path().as_str()]);
    run_cli(&full).expect_err("command should fail")
}

#[rstest]
fn match_ranks_candidates_by_total_score(dataset: DatasetFile) {
    let output = run(&dataset, &["match", "--user", "7"]);
    let results = output.get("results").expect("results field");
    assert_eq!(area_ids(results), vec![1, 4, 2]);
    assert_eq!(output.get("totalCandidates"), Some(&json!(3)));
    assert_eq!(
        results.pointer("/0/totalScore"),
        Some(&json!(61)),
        "Baner scores 21 + 19.5 + 0 + 20"
    );
    assert_eq!(
        results.pointer("/0/breakdown"),
        Some(&json!({
            "safety": 21,
            "lifestyle": 20,
            "affordability": 0,
            "walkability": 20
        }))
    );
}

#[rstest]
#[case::limit(&["match", "--user", "7", "--limit", "1"], vec![1])]
#[case::city(&["match", "--user", "7", "--city", "mumbai"], vec![])]
fn match_honours_limit_and_city(
    dataset: DatasetFile,
    #[case] args: &[&str],
    #[case] expected: Vec<u64>,
) {
    let output = run(&dataset, args);
    assert_eq!(area_ids(output.get("results").expect("results")), expected);
}

#[rstest]
fn match_reports_unknown_users(dataset: DatasetFile) {
    let err = run_err(&dataset, &["match", "--user", "99"]);
    match err {
        CliError::Engine(EngineError::NotFound(NotFound::User(user))) => assert_eq!(user, 99),
        other => panic!("expected unknown user, found {other:?}"),
    }
}

#[rstest]
#[case::safety_floor(&["anonymous"], vec![1, 4, 2])]
#[case::pets(&["anonymous", "--pet-friendly", "true"], vec![2])]
#[case::floor_disabled(&["anonymous", "--min-safety-score", "0", "--city", "mumbai"], vec![3])]
#[case::walkable(&["anonymous", "--walkability", "high", "--limit", "1"], vec![1])]
fn anonymous_orders_by_safety(
    dataset: DatasetFile,
    #[case] args: &[&str],
    #[case] expected: Vec<u64>,
) {
    assert_eq!(area_ids(&run(&dataset, args)), expected);
}

#[rstest]
#[case::safety_desc(&["search", "--city", "pune", "--sort-by", "safetyScore", "--order", "desc"], vec![1, 4, 2])]
#[case::lifestyle_asc(&["search", "--sort-by", "lifestyle", "--order", "asc"], vec![3, 2, 4, 1])]
#[case::schools(&["search", "--schools-nearby", "true", "--min-parks", "2", "--sort-by", "name"], vec![4, 1])]
#[case::crime(&["search", "--max-crime-rate", "25", "--sort-by", "crimeRate"], vec![1, 4])]
fn search_filters_and_sorts(dataset: DatasetFile, #[case] args: &[&str], #[case] expected: Vec<u64>) {
    assert_eq!(area_ids(&run(&dataset, args)), expected);
}

#[rstest]
fn compare_summarises_the_requested_areas(dataset: DatasetFile) {
    let output = run(&dataset, &["compare", "2", "1"]);
    assert_eq!(output.pointer("/perArea/0/id"), Some(&json!(2)));
    assert_eq!(output.pointer("/bestSafety/id"), Some(&json!(1)));
    assert_eq!(output.pointer("/bestLifestyle/id"), Some(&json!(1)));
    assert_eq!(
        output.pointer("/bestSafety/fullLocation"),
        Some(&json!("Baner, Pune"))
    );
    assert_eq!(area_ids(output.get("mostWalkable").expect("walkable")), vec![1]);
    assert_eq!(area_ids(output.get("petFriendly").expect("pets")), vec![2]);
}

#[rstest]
fn compare_rejects_a_single_distinct_area(dataset: DatasetFile) {
    let err = run_err(&dataset, &["compare", "1", "1"]);
    match err {
        CliError::Engine(EngineError::Validation(ValidationError::TooFewAreas { .. })) => {}
        other => panic!("expected TooFewAreas, found {other:?}"),
    }
}

#[rstest]
fn compare_reports_unknown_areas(dataset: DatasetFile) {
    let err = run_err(&dataset, &["compare", "1", "98", "99"]);
    match err {
        CliError::Engine(EngineError::NotFound(NotFound::Areas { missing })) => {
            assert_eq!(missing, vec![98, 99]);
        }
        other => panic!("expected missing areas, found {other:?}"),
    }
}

#[rstest]
fn recommend_finds_areas_near_the_favourites(dataset: DatasetFile) {
    let output = run(&dataset, &["recommend", "--user", "7"]);
    assert_eq!(area_ids(output.get("results").expect("results")), vec![4]);
    assert_eq!(
        output.get("basedOn"),
        Some(&json!({ "favoriteCount": 1, "avgSafety": 70, "avgLifestyle": 65 }))
    );
}

#[rstest]
fn recommend_without_favourites_explains_why(dataset: DatasetFile) {
    let output = run(&dataset, &["recommend", "--user", "8"]);
    assert_eq!(output, json!({ "results": [], "reason": "no favorites" }));
}

#[rstest]
fn stats_and_cities_cover_the_population(dataset: DatasetFile) {
    let stats = run(&dataset, &["stats"]);
    assert_eq!(stats.get("totalAreas"), Some(&json!(4)));
    assert_eq!(stats.get("cities"), Some(&json!(["Mumbai", "Pune"])));

    let cities = run(&dataset, &["cities"]);
    assert_eq!(cities, json!(["Mumbai", "Pune"]));
}

#[rstest]
fn show_includes_derived_scores(dataset: DatasetFile) {
    let area = run(&dataset, &["show", "4"]);
    assert_eq!(area.get("name"), Some(&json!("Aundh")));
    assert_eq!(area.get("safetyScore"), Some(&json!(68)));
    assert_eq!(area.get("lifestyleScore"), Some(&json!(60)));
}

#[rstest]
fn show_reports_unknown_areas(dataset: DatasetFile) {
    let err = run_err(&dataset, &["show", "42"]);
    match err {
        CliError::Engine(EngineError::NotFound(NotFound::Area(id))) => assert_eq!(id, 42),
        other => panic!("expected unknown area, found {other:?}"),
    }
}

#[rstest]
fn missing_dataset_is_reported_before_running(dataset: DatasetFile) {
    let missing = dataset.dir().join("nope.json");
    let err = run_cli(&["stats", "--dataset", missing.as_str()])
        .expect_err("missing dataset should fail");
    assert!(matches!(err, CliError::MissingDataset { .. }), "found {err:?}");
}
