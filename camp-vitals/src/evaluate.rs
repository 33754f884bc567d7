//! Per-metric classification against [`ReferenceRanges`].
//!
//! Every evaluator is a pure function returning `None` when its input cannot be
//! classified. Within one metric the bands are contiguous: each branch only
//! tests the bound that separates it from the next band.

use camp_core::{
    BloodPressureRanges, BmiRanges, Gender, GlucoseRanges, HemoglobinRanges, Spo2Ranges, Status,
    Verdict,
};

use crate::parse::parse_blood_pressure;

pub fn evaluate_bmi(bmi: f64, ranges: &BmiRanges) -> Option<Verdict> {
    if bmi.is_nan() {
        return None;
    }
    let verdict = if bmi < ranges.underweight_below {
        Verdict::new(
            Status::Low,
            "Underweight",
            "Below the usual healthy range (18.5–24.9).",
        )
    } else if bmi < ranges.overweight_from {
        Verdict::new(
            Status::Normal,
            "Normal",
            "Within the usual healthy BMI range (18.5–24.9).",
        )
    } else if bmi < ranges.obese_from {
        Verdict::new(
            Status::Borderline,
            "Overweight",
            "Above the usual healthy range. Consider lifestyle changes.",
        )
    } else {
        Verdict::new(
            Status::High,
            "Obese",
            "Significantly above the usual healthy range. Medical advice is recommended.",
        )
    };
    Some(verdict)
}

/// SpO₂ has no high band: saturation cannot read abnormally high.
pub fn evaluate_spo2(spo2: f64, ranges: &Spo2Ranges) -> Option<Verdict> {
    if spo2.is_nan() {
        return None;
    }
    let verdict = if spo2 >= ranges.normal_from {
        Verdict::new(
            Status::Normal,
            "Normal",
            "Usual oxygen saturation is 95–100%.",
        )
    } else if spo2 >= ranges.borderline_from {
        Verdict::new(
            Status::Borderline,
            "Borderline",
            "Slightly low. Monitor and consult a doctor if symptoms are present.",
        )
    } else {
        Verdict::new(
            Status::Low,
            "Low",
            "Below usual range. Please consult a doctor promptly.",
        )
    };
    Some(verdict)
}

/// Classifies a `"<systolic>/<diastolic>"` reading.
///
/// The rules overlap and are applied first-match-wins: low if either side is
/// low, normal if both are within limits, borderline if *either* side is
/// within the elevated limit, high otherwise. A reading such as `130/95`
/// therefore lands in borderline. The order is load-bearing.
pub fn evaluate_blood_pressure(raw: &str, ranges: &BloodPressureRanges) -> Option<Verdict> {
    let (systolic, diastolic) = parse_blood_pressure(raw)?;
    Some(classify_blood_pressure(systolic, diastolic, ranges))
}

pub fn classify_blood_pressure(
    systolic: i64,
    diastolic: i64,
    ranges: &BloodPressureRanges,
) -> Verdict {
    if systolic < ranges.low_systolic_below || diastolic < ranges.low_diastolic_below {
        Verdict::new(
            Status::Low,
            "Low",
            "Below usual range. May need medical review, especially if symptomatic.",
        )
    } else if systolic <= ranges.normal_systolic_max && diastolic <= ranges.normal_diastolic_max {
        Verdict::new(
            Status::Normal,
            "Normal",
            "Close to usual reference value 120/80 mmHg.",
        )
    } else if systolic <= ranges.elevated_systolic_max
        || diastolic <= ranges.elevated_diastolic_max
    {
        Verdict::new(
            Status::Borderline,
            "Pre-hypertensive",
            "Above ideal. Regular monitoring and lifestyle care advised.",
        )
    } else {
        Verdict::new(
            Status::High,
            "High",
            "Raised blood pressure. Please discuss with your doctor.",
        )
    }
}

/// Random (or unspecified context) blood sugar in mg/dL.
pub fn evaluate_blood_sugar(sugar: f64, ranges: &GlucoseRanges) -> Option<Verdict> {
    if sugar.is_nan() {
        return None;
    }
    let verdict = if sugar < ranges.low_below {
        Verdict::new(
            Status::Low,
            "Low",
            "Below 70 mg/dL. This is lower than usual and may need urgent attention if symptomatic.",
        )
    } else if sugar <= ranges.normal_max {
        Verdict::new(
            Status::Normal,
            "Normal",
            "Within typical range (about 70–140 mg/dL depending on fasting/meal timing).",
        )
    } else if sugar <= ranges.borderline_max {
        Verdict::new(
            Status::Borderline,
            "Borderline High",
            "Above usual target. Further testing and medical advice are recommended.",
        )
    } else {
        Verdict::new(
            Status::High,
            "High",
            "Significantly above usual targets. Please consult your doctor.",
        )
    };
    Some(verdict)
}

/// Post-prandial (2-hour) blood sugar in mg/dL.
pub fn evaluate_ppbs(ppbs: f64, ranges: &GlucoseRanges) -> Option<Verdict> {
    if ppbs.is_nan() {
        return None;
    }
    let verdict = if ppbs < ranges.low_below {
        Verdict::new(
            Status::Low,
            "Low",
            "Below typical PPBS reference (110–150 mg/dL). Interpret with clinical context.",
        )
    } else if ppbs <= ranges.normal_max {
        Verdict::new(
            Status::Normal,
            "Normal",
            "Within the usual PPBS range (110–150 mg/dL).",
        )
    } else if ppbs <= ranges.borderline_max {
        Verdict::new(
            Status::Borderline,
            "Borderline High",
            "Above usual range. Follow-up with your doctor is advisable.",
        )
    } else {
        Verdict::new(
            Status::High,
            "High",
            "Significantly above usual PPBS targets. Please consult your doctor.",
        )
    };
    Some(verdict)
}

/// Hemoglobin in g/dL against the band selected by `gender`.
pub fn evaluate_hemoglobin(
    hb: f64,
    gender: Option<Gender>,
    ranges: &HemoglobinRanges,
) -> Option<Verdict> {
    if hb.is_nan() {
        return None;
    }
    let band = ranges.for_gender(gender);
    let (low, high) = (band.low, band.high);
    let verdict = if hb < low {
        Verdict::new(
            Status::Low,
            "Low",
            format!(
                "Below usual range ({low}–{high} g/dL). May suggest anaemia; please consult a doctor."
            ),
        )
    } else if hb > high {
        Verdict::new(
            Status::High,
            "High",
            format!("Above usual range ({low}–{high} g/dL). Needs clinical correlation."),
        )
    } else {
        Verdict::new(
            Status::Normal,
            "Normal",
            format!("Within usual range ({low}–{high} g/dL)."),
        )
    };
    Some(verdict)
}
