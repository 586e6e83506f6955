//! Decimal rendering of the values interpolated into a derivation.
//!
//! Integral values print bare (`8`, never `8.0`), fractions use the shortest
//! round-trip digits (`1.5`, `0.375`), and magnitudes outside
//! `[1e-6, 1e21)` switch to exponent form (`1e+21`, `1.5e-7`).

/// Render `x` the way the derivation text expects.
pub fn numeral(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if x < 0.0 {
        return format!("-{}", numeral(-x));
    }
    if x.is_infinite() {
        return "Infinity".to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.5e0".
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits = even_on_tie(x, digits, exp);

    // Position of the decimal point relative to the start of `digits`.
    let point = exp + 1;
    let k = digits.len() as i32;

    if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exp.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exp.abs())
        }
    }
}

/// `{:e}` rounds an exact tie between two shortest candidates upward; the
/// derivation text wants the even one. `digits` is the shortest form with
/// decimal exponent `exp`.
fn even_on_tie(x: f64, digits: String, exp: i32) -> String {
    let Some(last) = digits.as_bytes().last().map(|b| b - b'0') else {
        return digits;
    };
    if digits.len() < 2 || last % 2 == 0 {
        return digits;
    }

    let mut lower = digits[..digits.len() - 1].to_string();
    lower.push(char::from(b'0' + last - 1));

    // A tie means x is exactly `lower` followed by a 5.
    let exact = format!("{x:.767e}");
    let Some((exact_mantissa, exact_exp)) = exact.split_once('e') else {
        return digits;
    };
    let exact_digits: String = exact_mantissa.chars().filter(|c| *c != '.').collect();
    let exact_digits = exact_digits.trim_end_matches('0');
    if exact_exp.parse::<i32>().ok() != Some(exp) || exact_digits != format!("{lower}5") {
        return digits;
    }

    let candidate = format!("{}.{}e{exp}", &lower[..1], &lower[1..]);
    if candidate.parse::<f64>().ok() == Some(x) {
        lower
    } else {
        digits
    }
}
