//! Focused unit tests covering `match` configuration merging.

use super::*;
use crate::commands::{
    DEFAULT_MATCH_LIMIT, ENV_MATCH_DATASET, ENV_MATCH_USER, MatchArgs, MatchConfig,
    match_config_from_layers_for_test,
};
use camino::Utf8PathBuf;
use neighborfit_core::Limit;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(None, Some(7), ARG_DATASET, ENV_MATCH_DATASET)]
#[case(Some(Utf8PathBuf::from("areas.json")), None, ARG_USER, ENV_MATCH_USER)]
fn converting_without_required_fields_errors(
    #[case] dataset: Option<Utf8PathBuf>,
    #[case] user: Option<u64>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = MatchArgs {
        dataset,
        user,
        ..MatchArgs::default()
    };
    let err = MatchConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_defaults_the_limit() {
    let args = MatchArgs {
        dataset: Some(Utf8PathBuf::from("areas.json")),
        user: Some(7),
        ..MatchArgs::default()
    };
    let config = MatchConfig::try_from(args).expect("complete arguments convert");
    assert_eq!(config.limit, DEFAULT_MATCH_LIMIT);
    assert_eq!(config.limit.get(), 10);
    assert_eq!(config.city, None);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "dataset": 42 }));

    let err = match_config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_reject_a_zero_limit() {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "dataset": "areas.json", "user": 7, "limit": 0 }), None);

    let err = match_config_from_layers_for_test(composer.layers())
        .expect_err("zero limit should be rejected");
    assert!(matches!(err, CliError::Configuration(_)), "found {err:?}");
}

#[rstest]
fn merge_layers_honour_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "dataset": "from-file.json", "user": 1, "city": "Pune" }),
        None,
    );
    composer.push_environment(json!({ "user": 7, "limit": 20 }));
    composer.push_cli(json!({ "limit": 3 }));

    let config =
        match_config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(
        config,
        MatchConfig {
            dataset: Utf8PathBuf::from("from-file.json"),
            user: 7,
            city: Some("Pune".to_owned()),
            limit: Limit::new(3).expect("non-zero limit"),
        }
    );
}

#[rstest]
#[case(&["match", "--dataset", "areas.json", "--user", "7", "--limit", "0"])]
#[case(&["match", "--dataset", "areas.json", "--user", "seven"])]
#[case(&["search", "--dataset", "areas.json", "--sort-by", "altitude"])]
#[case(&["anonymous", "--dataset", "areas.json", "--walkability", "extreme"])]
#[case(&["show", "--dataset", "areas.json", "--id", "4"])]
fn clap_rejects_malformed_arguments(#[case] args: &[&str]) {
    let err = Cli::try_parse_from(std::iter::once("neighborfit").chain(args.iter().copied()))
        .expect_err("malformed arguments should fail to parse");
    assert_ne!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
