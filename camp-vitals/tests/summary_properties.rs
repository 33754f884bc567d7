use camp_core::{Advisory, BmiSource, EvaluationConfig, MetricKind, Status};
use camp_vitals::{summarize_fields, summarize_form_value, FormFields};
use serde_json::json;

fn summarize(value: serde_json::Value) -> camp_core::Summary {
    summarize_form_value(&value, &EvaluationConfig::default()).expect("summary")
}

#[test]
fn bmi_and_low_spo2_only() {
    let summary = summarize(json!({ "bmi": "22", "spo2": "90" }));

    let kinds: Vec<MetricKind> = summary.metrics.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MetricKind::Bmi, MetricKind::Spo2]);
    assert_eq!(summary.metrics[0].status(), Status::Normal);
    assert_eq!(summary.metrics[1].status(), Status::Low);
    assert!(summary.has_issues);
    assert_eq!(summary.advisory(), Advisory::ConsultDoctor);
}

#[test]
fn empty_submission_has_no_metrics() {
    let summary = summarize(json!({}));
    assert!(summary.metrics.is_empty());
    assert!(!summary.has_issues);
    assert_eq!(summary.advisory(), Advisory::WithinRange);
}

#[test]
fn unparseable_fields_are_omitted() {
    let summary = summarize(json!({
        "weight": "",
        "height": "170",
        "spo2": "n/a",
        "bp": "120",
        "bloodSugar": "high",
        "ppbs": "",
        "hb": "13.5"
    }));

    assert_eq!(summary.metrics.len(), 1);
    assert_eq!(summary.metrics[0].kind, MetricKind::Hemoglobin);
    assert!(!summary.has_issues);
}

#[test]
fn malformed_blood_pressure_does_not_block_other_metrics() {
    let summary = summarize(json!({ "bp": "abc/80", "bloodSugar": "250" }));
    assert!(summary.metric(MetricKind::BloodPressure).is_none());
    let sugar = summary.metric(MetricKind::BloodSugar).expect("sugar metric");
    assert_eq!(sugar.status(), Status::High);
    assert!(summary.has_issues);
}

#[test]
fn borderline_spo2_alone_raises_issue() {
    let summary = summarize(json!({ "spo2": "93" }));
    assert_eq!(summary.metrics[0].verdict.status_text, "Borderline");
    assert!(summary.has_issues);
}

#[test]
fn hemoglobin_without_gender_uses_generic_band() {
    let summary = summarize(json!({ "hb": "16.5", "gender": "" }));
    let hb = summary.metric(MetricKind::Hemoglobin).expect("hb metric");
    assert_eq!(hb.status(), Status::High);
    assert_eq!(hb.value, "16.5");
    assert!(hb.verdict.note.contains("12–16 g/dL"));
}

#[test]
fn zero_height_without_submitted_bmi_omits_bmi() {
    let summary = summarize(json!({ "weight": "60", "height": "0", "spo2": "99" }));
    assert!(summary.metric(MetricKind::Bmi).is_none());
    assert_eq!(summary.metrics.len(), 1);
}

#[test]
fn submitted_bmi_is_classified_unrounded() {
    let config = EvaluationConfig {
        bmi_source: BmiSource::Submitted,
        ..EvaluationConfig::default()
    };
    let fields = FormFields {
        bmi: Some("24.96".to_string()),
        ..FormFields::default()
    };
    let summary = summarize_fields(&fields, &config);
    let bmi = summary.metric(MetricKind::Bmi).expect("bmi metric");
    assert_eq!(bmi.status(), Status::Normal);
    assert_eq!(bmi.value, "25.0");
}

#[test]
fn repeated_evaluation_is_identical() {
    let submission = json!({
        "weight": "82",
        "height": "168",
        "spo2": "94",
        "bp": "145/95",
        "bloodSugar": "180",
        "ppbs": "210",
        "hb": "11.2",
        "gender": "female"
    });
    let first = summarize(submission.clone());
    let second = summarize(submission);
    assert_eq!(first, second);
    assert_eq!(first.metrics.len(), 6);
    assert!(first.has_issues);
}
