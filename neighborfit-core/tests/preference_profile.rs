#![expect(clippy::expect_used, reason = "tests should fail fast when setup breaks")]
//! Behaviour tests for preference profile decoding and validation.

use neighborfit_core::{AreaKind, Preference, PreferenceProfile, ValidationError, Walkability};
use rstest::rstest;

const WEIGHTS: &str =
    r#""weights":{"safety":0.3,"lifestyle":0.3,"affordability":0.2,"walkability":0.2}"#;

/// Decode a profile document made of `fields` plus the standard weights.
fn decode(fields: &str) -> Result<PreferenceProfile, serde_json::Error> {
    let separator = if fields.is_empty() { "" } else { "," };
    serde_json::from_str(&format!("{{{fields}{separator}{WEIGHTS}}}"))
}

#[rstest]
fn weights_alone_yield_defaults_for_other_fields() {
    let profile = decode("").expect("defaults apply");
    assert_eq!(profile, PreferenceProfile::default());
    assert_eq!(profile.min_safety_score, 50);
}

#[rstest]
#[case("{}")]
#[case(r#"{"minSafetyScore":40}"#)]
fn documents_without_weights_are_rejected(#[case] json: &str) {
    let err = serde_json::from_str::<PreferenceProfile>(json)
        .expect_err("weights must be supplied explicitly");
    assert!(
        err.to_string().contains("missing field `weights`"),
        "unexpected error {err}"
    );
}

#[rstest]
#[case(r#""desiredType":"Any""#, Preference::Any)]
#[case(r#""desiredType":null"#, Preference::Any)]
#[case(r#""desiredType":"Rural""#, Preference::Only(AreaKind::Rural))]
fn decodes_desired_type(#[case] fields: &str, #[case] expected: Preference<AreaKind>) {
    let profile = decode(fields).expect("valid profile");
    assert_eq!(profile.desired_type, expected);
}

#[rstest]
#[case(r#""petFriendly":true"#, Preference::Only(true))]
#[case(r#""petFriendly":false"#, Preference::Only(false))]
#[case(r#""petFriendly":null"#, Preference::Any)]
fn decodes_tri_state_flags(#[case] fields: &str, #[case] expected: Preference<bool>) {
    let profile = decode(fields).expect("valid profile");
    assert_eq!(profile.pet_friendly, expected);
}

#[rstest]
fn open_preferences_serialise_as_null() {
    let profile = PreferenceProfile {
        desired_walkability: Preference::Only(Walkability::High),
        ..PreferenceProfile::default()
    };
    let json = serde_json::to_value(&profile).expect("serialise profile");
    assert_eq!(json["desiredType"], serde_json::Value::Null);
    assert_eq!(json["desiredWalkability"], "High");
}

#[rstest]
#[case(r#"{"weights":{"safety":0.5,"lifestyle":0.5,"affordability":0.5,"walkability":0.0}}"#)]
#[case(r#"{"weights":{"safety":1.2,"lifestyle":0.0,"affordability":0.0,"walkability":-0.2}}"#)]
#[case(r#"{"weights":null}"#)]
fn rejects_invalid_weights(#[case] json: &str) {
    assert!(serde_json::from_str::<PreferenceProfile>(json).is_err());
}

#[rstest]
#[case(r#""minSafetyScore":180"#)]
#[case(r#""maxRent":-10.0"#)]
#[case(r#""desiredType":"Metropolis""#)]
fn rejects_invalid_fields(#[case] fields: &str) {
    assert!(decode(fields).is_err());
}

#[rstest]
fn weight_sum_error_reports_the_sum() {
    let err = neighborfit_core::Weights::new(0.4, 0.4, 0.4, 0.0).expect_err("sum is 1.2");
    match err {
        ValidationError::WeightsDoNotSumToOne { sum, .. } => {
            assert!((sum - 1.2).abs() < 1e-9, "unexpected sum {sum}");
        }
        other => panic!("expected WeightsDoNotSumToOne, found {other:?}"),
    }
}
