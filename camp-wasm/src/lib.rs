//! Framework-neutral WASM <-> JavaScript bridge for the camp form.

use camp_core::{BmiSource, CampError, EvaluationConfig, Gender, ReferenceRanges};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsEvaluationConfig {
    #[serde(default)]
    bmi_source: Option<BmiSource>,
    #[serde(default)]
    default_gender: Option<Gender>,
}

impl From<JsEvaluationConfig> for EvaluationConfig {
    fn from(cfg: JsEvaluationConfig) -> Self {
        let mut base = EvaluationConfig::default();
        if let Some(source) = cfg.bmi_source {
            base.bmi_source = source;
        }
        if cfg.default_gender.is_some() {
            base.default_gender = cfg.default_gender;
        }
        base
    }
}

/// Evaluate a form submission (plain object of field name to value).
#[wasm_bindgen(js_name = summarizeForm)]
pub fn summarize_form(fields: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let fields_value = from_value::<serde_json::Value>(fields)
        .map_err(|err| JsValue::from_str(&format!("Could not read form fields: {err}")))?;

    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsEvaluationConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            EvaluationConfig::from(cfg)
        }
        _ => EvaluationConfig::default(),
    };

    let summary = camp_vitals::summarize_form_value(&fields_value, &cfg)
        .map_err(|err| JsValue::from_str(&format_camp_error(err)))?;

    to_plain_object(&summary, "summary")
}

/// The static reference-range table, for display next to the form.
#[wasm_bindgen(js_name = referenceRanges)]
pub fn reference_ranges() -> Result<JsValue, JsValue> {
    to_plain_object(&ReferenceRanges::STANDARD, "reference ranges")
}

// Flattened structs serialize as maps; keep them plain JS objects.
fn to_plain_object<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Could not serialize {what}: {err}")))
}

fn format_camp_error(err: CampError) -> String {
    format!("Camp form error: {err}")
}
