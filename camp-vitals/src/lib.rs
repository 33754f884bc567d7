//! Classifies health-camp vital readings against reference ranges and rolls
//! the verdicts into a [`camp_core::Summary`].
//!
//! Unusable inputs never fail an evaluation: the affected metric is left out
//! of the summary and every other metric is still evaluated.

pub mod aggregate;
pub mod evaluate;
pub mod form;
pub mod parse;

pub use aggregate::{aggregate, is_issue, Aggregator};
pub use evaluate::{
    classify_blood_pressure, evaluate_blood_pressure, evaluate_blood_sugar, evaluate_bmi,
    evaluate_hemoglobin, evaluate_ppbs, evaluate_spo2,
};
pub use form::{
    format_bmi, format_value, summarize_fields, summarize_form_str, summarize_form_value,
    FormFields,
};
pub use parse::compute_bmi;
