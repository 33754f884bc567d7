//! Camp form submission to [`Summary`].

use camp_core::{
    BmiSource, CampError, EvaluationConfig, Gender, Metric, MetricKind, ReferenceRanges, Summary,
    Verdict,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::Aggregator;
use crate::evaluate::{
    evaluate_blood_pressure, evaluate_blood_sugar, evaluate_bmi, evaluate_hemoglobin,
    evaluate_ppbs, evaluate_spo2,
};
use crate::parse::{compute_bmi, parse_float, round_to_tenth};

/// Raw field values exactly as the form submits them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub weight: Option<String>,
    pub height: Option<String>,
    pub bmi: Option<String>,
    pub spo2: Option<String>,
    pub bp: Option<String>,
    pub blood_sugar: Option<String>,
    pub ppbs: Option<String>,
    pub hb: Option<String>,
    pub gender: Option<String>,
}

impl FormFields {
    /// Reads fields from a JSON object. Strings and numbers are taken as-is;
    /// `null` or any other JSON type counts as absent.
    pub fn from_value(value: &Value) -> Result<Self, CampError> {
        let object = value.as_object().ok_or(CampError::NotAnObject)?;
        let field = |name: &str| object.get(name).and_then(field_text);

        Ok(Self {
            weight: field("weight"),
            height: field("height"),
            bmi: field("bmi"),
            spo2: field("spo2"),
            bp: field("bp"),
            blood_sugar: field("bloodSugar"),
            ppbs: field("ppbs"),
            hb: field("hb"),
            gender: field("gender"),
        })
    }

    /// Overlays every field set in `other` onto `self`.
    pub fn merge(&mut self, other: FormFields) {
        let FormFields {
            weight,
            height,
            bmi,
            spo2,
            bp,
            blood_sugar,
            ppbs,
            hb,
            gender,
        } = other;
        overlay(&mut self.weight, weight);
        overlay(&mut self.height, height);
        overlay(&mut self.bmi, bmi);
        overlay(&mut self.spo2, spo2);
        overlay(&mut self.bp, bp);
        overlay(&mut self.blood_sugar, blood_sugar);
        overlay(&mut self.ppbs, ppbs);
        overlay(&mut self.hb, hb);
        overlay(&mut self.gender, gender);
    }

    /// BMI to classify, chosen according to `source`.
    pub fn resolve_bmi(&self, source: BmiSource) -> Option<f64> {
        let derived = || {
            let weight = parse_float(self.weight.as_deref()?)?;
            let height = parse_float(self.height.as_deref()?)?;
            // The form fills its BMI box with one decimal; that figure is what gets classified.
            compute_bmi(weight, height).map(round_to_tenth)
        };
        let submitted = || parse_float(self.bmi.as_deref()?);

        match source {
            BmiSource::PreferDerived => derived().or_else(submitted),
            BmiSource::Derived => derived(),
            BmiSource::Submitted => submitted(),
        }
    }

    /// Hemoglobin band selector; falls back to the configured default gender.
    pub fn resolve_gender(&self, config: &EvaluationConfig) -> Option<Gender> {
        self.gender
            .as_deref()
            .and_then(Gender::parse)
            .or(config.default_gender)
    }
}

/// Summarize a submission given as a JSON string.
pub fn summarize_form_str(json: &str, config: &EvaluationConfig) -> Result<Summary, CampError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| CampError::Parse(err.to_string()))?;
    summarize_form_value(&value, config)
}

/// Summarize a submission given as a `serde_json::Value`.
pub fn summarize_form_value(
    value: &Value,
    config: &EvaluationConfig,
) -> Result<Summary, CampError> {
    let fields = FormFields::from_value(value)?;
    Ok(summarize_fields(&fields, config))
}

/// Evaluate every metric the submission allows and aggregate the results.
pub fn summarize_fields(fields: &FormFields, config: &EvaluationConfig) -> Summary {
    let ranges = &ReferenceRanges::STANDARD;
    let mut aggregator = Aggregator::new();

    let bmi = fields.resolve_bmi(config.bmi_source);
    let bmi_verdict = bmi.and_then(|value| evaluate_bmi(value, &ranges.bmi));
    record(&mut aggregator, MetricKind::Bmi, bmi.map(format_bmi), bmi_verdict);

    let spo2 = numeric(&fields.spo2);
    let spo2_verdict = spo2.and_then(|value| evaluate_spo2(value, &ranges.spo2));
    record(&mut aggregator, MetricKind::Spo2, spo2.map(format_value), spo2_verdict);

    let bp_verdict = fields
        .bp
        .as_deref()
        .and_then(|raw| evaluate_blood_pressure(raw, &ranges.blood_pressure));
    record(
        &mut aggregator,
        MetricKind::BloodPressure,
        fields.bp.clone(),
        bp_verdict,
    );

    let sugar = numeric(&fields.blood_sugar);
    let sugar_verdict = sugar.and_then(|value| evaluate_blood_sugar(value, &ranges.blood_sugar));
    record(
        &mut aggregator,
        MetricKind::BloodSugar,
        sugar.map(format_value),
        sugar_verdict,
    );

    let ppbs = numeric(&fields.ppbs);
    let ppbs_verdict = ppbs.and_then(|value| evaluate_ppbs(value, &ranges.ppbs));
    record(&mut aggregator, MetricKind::Ppbs, ppbs.map(format_value), ppbs_verdict);

    let hb = numeric(&fields.hb);
    let gender = fields.resolve_gender(config);
    let hb_verdict = hb.and_then(|value| evaluate_hemoglobin(value, gender, &ranges.hemoglobin));
    record(&mut aggregator, MetricKind::Hemoglobin, hb.map(format_value), hb_verdict);

    aggregator.finish()
}

fn record(
    aggregator: &mut Aggregator,
    kind: MetricKind,
    value: Option<String>,
    verdict: Option<Verdict>,
) {
    match verdict {
        Some(verdict) => {
            let value = value.unwrap_or_else(|| "N/A".to_string());
            aggregator.record(Metric::new(kind, value, verdict));
        }
        None => {
            tracing::debug!(metric = kind.label(), "input unusable, metric omitted");
        }
    }
}

fn numeric(field: &Option<String>) -> Option<f64> {
    field.as_deref().and_then(parse_float)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn overlay(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}

/// One decimal place, half away from zero.
pub fn format_bmi(bmi: f64) -> String {
    if !bmi.is_finite() {
        return "N/A".to_string();
    }
    format!("{:.1}", round_to_tenth(bmi))
}

/// Shortest form that reads back as the same number (`98`, `94.9`).
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_core::Status;
    use serde_json::json;

    fn fields(value: Value) -> FormFields {
        FormFields::from_value(&value).expect("form fields")
    }

    #[test]
    fn json_numbers_and_strings_are_both_read() {
        let form = fields(json!({ "spo2": 97, "hb": "12.5", "bp": null, "ppbs": true }));
        assert_eq!(form.spo2.as_deref(), Some("97"));
        assert_eq!(form.hb.as_deref(), Some("12.5"));
        assert_eq!(form.bp, None);
        assert_eq!(form.ppbs, None);
    }

    #[test]
    fn non_object_submission_is_rejected() {
        let err = summarize_form_value(&json!([1, 2]), &EvaluationConfig::default());
        assert!(matches!(err, Err(CampError::NotAnObject)));
        let err = summarize_form_str("{not json", &EvaluationConfig::default());
        assert!(matches!(err, Err(CampError::Parse(_))));
    }

    #[test]
    fn derived_bmi_wins_over_submitted_by_default() {
        let form = fields(json!({ "weight": "70", "height": "175", "bmi": "40" }));
        assert_eq!(form.resolve_bmi(BmiSource::PreferDerived), Some(22.9));
        assert_eq!(form.resolve_bmi(BmiSource::Submitted), Some(40.0));
    }

    #[test]
    fn submitted_bmi_used_when_weight_or_height_missing() {
        let form = fields(json!({ "weight": "70", "height": "0", "bmi": "22" }));
        assert_eq!(form.resolve_bmi(BmiSource::PreferDerived), Some(22.0));
        assert_eq!(form.resolve_bmi(BmiSource::Derived), None);
    }

    #[test]
    fn derived_bmi_at_band_edge_keeps_form_rounding() {
        let config = EvaluationConfig::default();

        let summary = summarize_fields(
            &fields(json!({ "weight": "73.8", "height": "200" })),
            &config,
        );
        let bmi = summary.metric(MetricKind::Bmi).expect("bmi metric");
        assert_eq!(bmi.value, "18.4");
        assert_eq!(bmi.status(), Status::Low);

        let summary = summarize_fields(
            &fields(json!({ "weight": "99.8", "height": "200" })),
            &config,
        );
        let bmi = summary.metric(MetricKind::Bmi).expect("bmi metric");
        assert_eq!(bmi.value, "24.9");
        assert_eq!(bmi.status(), Status::Normal);
    }

    #[test]
    fn infinite_weight_derives_no_bmi() {
        let summary = summarize_fields(
            &fields(json!({ "weight": "Infinity", "height": "170" })),
            &EvaluationConfig::default(),
        );
        assert!(summary.metric(MetricKind::Bmi).is_none());
        assert!(summary.metrics.is_empty());
    }

    #[test]
    fn bmi_display_uses_one_decimal() {
        assert_eq!(format_bmi(22.0), "22.0");
        assert_eq!(format_bmi(24.96), "25.0");
        assert_eq!(format_bmi(18.25), "18.3");
        assert_eq!(format_bmi(18.45), "18.4");
        assert_eq!(format_bmi(1.45), "1.4");
    }

    #[test]
    fn plain_values_drop_trailing_zero() {
        assert_eq!(format_value(98.0), "98");
        assert_eq!(format_value(94.9), "94.9");
        assert_eq!(format_value(f64::INFINITY), "N/A");
    }

    #[test]
    fn blood_pressure_value_is_shown_verbatim() {
        let summary = summarize_fields(
            &fields(json!({ "bp": "130 / 85" })),
            &EvaluationConfig::default(),
        );
        let bp = summary
            .metric(MetricKind::BloodPressure)
            .expect("bp metric");
        assert_eq!(bp.value, "130 / 85");
        assert_eq!(bp.status(), Status::Borderline);
    }

    #[test]
    fn default_gender_applies_only_without_recognized_gender() {
        let config = EvaluationConfig {
            default_gender: Some(Gender::Male),
            ..EvaluationConfig::default()
        };
        let unknown = fields(json!({ "hb": "12.5", "gender": "other" }));
        let female = fields(json!({ "hb": "12.5", "gender": "FEMALE" }));

        let summary = summarize_fields(&unknown, &config);
        assert_eq!(summary.metrics[0].status(), Status::Low);

        let summary = summarize_fields(&female, &config);
        assert_eq!(summary.metrics[0].status(), Status::Normal);
    }

    #[test]
    fn merge_overlays_present_fields_only() {
        let mut base = fields(json!({ "spo2": "97", "hb": "13" }));
        base.merge(FormFields {
            hb: Some("11".to_string()),
            ..FormFields::default()
        });
        assert_eq!(base.spo2.as_deref(), Some("97"));
        assert_eq!(base.hb.as_deref(), Some("11"));
    }
}
