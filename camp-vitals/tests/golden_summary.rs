use std::fs;

use camp_core::EvaluationConfig;
use camp_vitals::summarize_form_str;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn assert_matches_golden(submission: &str, golden: &str) {
    let form = fs::read_to_string(fixture_path(submission)).expect("Could not read submission");

    let summary =
        summarize_form_str(&form, &EvaluationConfig::default()).expect("Could not build summary");
    let actual = serde_json::to_value(summary).expect("Could not serialize summary");

    let expected = fs::read_to_string(fixture_path(golden)).expect("Could not read golden summary");
    let expected_value: Value = serde_json::from_str(&expected).expect("Golden is not valid JSON");

    assert_eq!(actual, expected_value);
}

#[test]
fn mixed_submission_matches_golden() {
    assert_matches_golden(
        "camp_submission_mixed.json",
        "camp_submission_mixed_summary.json",
    );
}

#[test]
fn normal_submission_matches_golden() {
    assert_matches_golden(
        "camp_submission_normal.json",
        "camp_submission_normal_summary.json",
    );
}
