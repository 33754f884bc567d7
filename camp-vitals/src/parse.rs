//! Lenient numeric parsing matching what a browser form hands over.
//!
//! Form inputs arrive as free text, so a value like `"98 %"` still counts as
//! 98. Only the leading numeric prefix is read and trailing text is ignored.

/// Reads the longest decimal prefix of `raw`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction (`"5."` and
/// `".5"` included), an optional exponent, and an `Infinity` literal.
pub fn parse_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_digits = count_digits(&bytes[cursor..]);
        if exp_digits > 0 {
            end = cursor + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Reads a base-10 integer prefix of `raw` after trimming whitespace.
///
/// `"120.6"` gives 120 and `"12x"` gives 12. Magnitudes beyond `i64` saturate.
pub fn parse_int(raw: &str) -> Option<i64> {
    let text = raw.trim();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = count_digits(rest.as_bytes());
    if digits == 0 {
        return None;
    }

    // Only overflow can fail here; every byte is a digit.
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Splits `"<systolic>/<diastolic>"` into two integers.
pub fn parse_blood_pressure(raw: &str) -> Option<(i64, i64)> {
    if raw.is_empty() {
        return None;
    }
    let mut parts = raw.split('/');
    let (Some(systolic), Some(diastolic), None) = (parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    Some((parse_int(systolic)?, parse_int(diastolic)?))
}

/// Body mass index from weight in kg and height in cm.
///
/// Returns `None` when either input is zero or not finite, as the form
/// leaves its BMI field blank in that case.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg == 0.0 || height_cm == 0.0 || !weight_kg.is_finite() || !height_cm.is_finite() {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Rounds the exact stored value to one decimal place, half away from zero.
///
/// `18.45` is stored just below 18.45 and rounds to 18.4; `18.25` is an exact
/// tie and rounds to 18.3.
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 10.0;
    // A zero residual means `scaled` is the exact product, so a .5 fraction is a real tie.
    let exact = value.mul_add(10.0, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        return scaled.round() / 10.0;
    }
    // Float formatting rounds the exact binary value.
    format!("{value:.1}").parse().unwrap_or(value)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
