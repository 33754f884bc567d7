//! Core data model for evaluating vital-sign readings captured at a health camp.

use serde::{Deserialize, Serialize};

/// Classification of a single reading against its reference band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Low,
    Normal,
    Borderline,
    High,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Low => "low",
            Status::Normal => "normal",
            Status::Borderline => "borderline",
            Status::High => "high",
        }
    }
}

/// The metrics a camp form can capture, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Bmi,
    Spo2,
    BloodPressure,
    BloodSugar,
    Ppbs,
    Hemoglobin,
}

impl MetricKind {
    pub const COUNT: usize = 6;

    /// Every metric, in the order they appear in a [`Summary`].
    pub const ALL: [MetricKind; MetricKind::COUNT] = [
        MetricKind::Bmi,
        MetricKind::Spo2,
        MetricKind::BloodPressure,
        MetricKind::BloodSugar,
        MetricKind::Ppbs,
        MetricKind::Hemoglobin,
    ];

    /// Position of the metric within [`MetricKind::ALL`].
    pub fn position(self) -> usize {
        self as usize
    }

    /// Human-facing label shown next to the value.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Bmi => "BMI",
            MetricKind::Spo2 => "SpO₂",
            MetricKind::BloodPressure => "Blood Pressure",
            MetricKind::BloodSugar => "Blood Sugar",
            MetricKind::Ppbs => "PPBS (2 hrs)",
            MetricKind::Hemoglobin => "Hemoglobin",
        }
    }

    /// Display unit; BMI is unitless.
    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Bmi => "",
            MetricKind::Spo2 => "%",
            MetricKind::BloodPressure => "mmHg",
            MetricKind::BloodSugar | MetricKind::Ppbs => "mg/dL",
            MetricKind::Hemoglobin => "g/dL",
        }
    }
}

/// Outcome of classifying one metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: Status,
    pub status_text: String,
    pub note: String,
}

impl Verdict {
    pub fn new(status: Status, status_text: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            note: note.into(),
        }
    }
}

/// A reading together with its verdict, ready for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metric {
    pub kind: MetricKind,
    pub label: String,
    /// Rendered value: one decimal for BMI, the plain form otherwise, "N/A" if unusable.
    pub value: String,
    pub unit: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl Metric {
    /// Builds a metric using the label and unit registered for `kind`.
    pub fn new(kind: MetricKind, value: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value: value.into(),
            unit: kind.unit().to_string(),
            verdict,
        }
    }

    pub fn status(&self) -> Status {
        self.verdict.status
    }
}

/// Complete evaluation of one submitted set of readings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub metrics: Vec<Metric>,
    pub has_issues: bool,
}

impl Summary {
    /// Summary of a submission with nothing evaluable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up the metric of the given kind, if it was evaluated.
    pub fn metric(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.iter().find(|metric| metric.kind == kind)
    }

    pub fn advisory(&self) -> Advisory {
        if self.has_issues {
            Advisory::ConsultDoctor
        } else {
            Advisory::WithinRange
        }
    }
}

/// Closing message shown under the metric grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    ConsultDoctor,
    WithinRange,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::ConsultDoctor => {
                "Some of your readings are outside the usual reference ranges. \
                 Please consult with a doctor and share this information for proper medical advice."
            }
            Advisory::WithinRange => {
                "Your key readings appear within the usual reference ranges. \
                 This is only an approximate guide – regular check-ups with your doctor are still important."
            }
        }
    }
}

/// Gender values that select a dedicated hemoglobin band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive match on the raw form value; anything else is unrecognized.
    pub fn parse(raw: &str) -> Option<Gender> {
        match raw.to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Closed interval `[low, high]` considered normal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

/// BMI cut-offs. Values below `underweight_below` are low, from `obese_from` high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BmiRanges {
    pub underweight_below: f64,
    pub overweight_from: f64,
    pub obese_from: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Spo2Ranges {
    pub normal_from: f64,
    pub borderline_from: f64,
}

/// Blood pressure limits in mmHg. Rules are applied first-match-wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BloodPressureRanges {
    pub low_systolic_below: i64,
    pub low_diastolic_below: i64,
    pub normal_systolic_max: i64,
    pub normal_diastolic_max: i64,
    pub elevated_systolic_max: i64,
    pub elevated_diastolic_max: i64,
}

/// Glucose limits in mg/dL, shared by random sugar and PPBS.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GlucoseRanges {
    pub low_below: f64,
    pub normal_max: f64,
    pub borderline_max: f64,
}

/// Hemoglobin bands in g/dL keyed by gender, with a generic fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HemoglobinRanges {
    pub male: Band,
    pub female: Band,
    pub default: Band,
}

impl HemoglobinRanges {
    pub fn for_gender(&self, gender: Option<Gender>) -> Band {
        match gender {
            Some(Gender::Male) => self.male,
            Some(Gender::Female) => self.female,
            None => self.default,
        }
    }
}

/// Static reference bands for every metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceRanges {
    pub bmi: BmiRanges,
    pub spo2: Spo2Ranges,
    pub blood_pressure: BloodPressureRanges,
    pub blood_sugar: GlucoseRanges,
    pub ppbs: GlucoseRanges,
    pub hemoglobin: HemoglobinRanges,
}

impl ReferenceRanges {
    pub const STANDARD: ReferenceRanges = ReferenceRanges {
        bmi: BmiRanges {
            underweight_below: 18.5,
            overweight_from: 25.0,
            obese_from: 30.0,
        },
        spo2: Spo2Ranges {
            normal_from: 95.0,
            borderline_from: 92.0,
        },
        blood_pressure: BloodPressureRanges {
            low_systolic_below: 90,
            low_diastolic_below: 60,
            normal_systolic_max: 120,
            normal_diastolic_max: 80,
            elevated_systolic_max: 139,
            elevated_diastolic_max: 89,
        },
        blood_sugar: GlucoseRanges {
            low_below: 70.0,
            normal_max: 140.0,
            borderline_max: 199.0,
        },
        ppbs: GlucoseRanges {
            low_below: 110.0,
            normal_max: 150.0,
            borderline_max: 199.0,
        },
        hemoglobin: HemoglobinRanges {
            male: Band {
                low: 13.0,
                high: 17.0,
            },
            female: Band {
                low: 12.0,
                high: 15.0,
            },
            default: Band {
                low: 12.0,
                high: 16.0,
            },
        },
    };
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Where the classified BMI comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmiSource {
    /// Derive from weight and height when both are usable, else use the submitted `bmi`.
    #[default]
    PreferDerived,
    /// Only derive from weight and height.
    Derived,
    /// Only classify the submitted `bmi` field.
    Submitted,
}

/// Tunables for one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EvaluationConfig {
    #[serde(default)]
    pub bmi_source: BmiSource,
    /// Gender assumed when the submission carries no recognizable one.
    #[serde(default)]
    pub default_gender: Option<Gender>,
}

/// Errors raised at the intake boundary. Unusable individual fields are never errors.
#[derive(Debug, thiserror::Error)]
pub enum CampError {
    #[error("Could not read submission: {0}")]
    Parse(String),
    #[error("Submission must be a JSON object of named fields")]
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_kinds_are_listed_in_position_order() {
        for (index, kind) in MetricKind::ALL.iter().enumerate() {
            assert_eq!(kind.position(), index);
        }
    }

    #[test]
    fn gender_is_case_insensitive() {
        assert_eq!(Gender::parse("MALE"), Some(Gender::Male));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse(""), None);
        assert_eq!(Gender::parse("other"), None);
    }

    #[test]
    fn hemoglobin_band_lookup_falls_back_to_default() {
        let hb = ReferenceRanges::STANDARD.hemoglobin;
        assert_eq!(hb.for_gender(Some(Gender::Male)), Band { low: 13.0, high: 17.0 });
        assert_eq!(hb.for_gender(Some(Gender::Female)), Band { low: 12.0, high: 15.0 });
        assert_eq!(hb.for_gender(None), Band { low: 12.0, high: 16.0 });
    }

    #[test]
    fn metric_serializes_with_flattened_verdict() {
        let metric = Metric::new(
            MetricKind::Spo2,
            "97",
            Verdict::new(Status::Normal, "Normal", "Usual oxygen saturation is 95–100%."),
        );
        let value = serde_json::to_value(&metric).expect("serialize metric");
        assert_eq!(value["kind"], "spo2");
        assert_eq!(value["label"], "SpO₂");
        assert_eq!(value["unit"], "%");
        assert_eq!(value["status"], "normal");
        assert_eq!(value["statusText"], "Normal");
    }

    #[test]
    fn empty_summary_is_within_range() {
        let summary = Summary::empty();
        assert!(summary.metrics.is_empty());
        assert!(!summary.has_issues);
        assert_eq!(summary.advisory(), Advisory::WithinRange);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: EvaluationConfig = serde_json::from_str("{}").expect("parse config");
        assert_eq!(config, EvaluationConfig::default());
        assert_eq!(config.bmi_source, BmiSource::PreferDerived);
    }
}
