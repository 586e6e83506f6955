use regex::Regex;
use std::sync::LazyLock;

use crate::error::{RecurError, Rejection, Result};

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());
static INFINITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?Infinity$").unwrap());
static RADIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0(?:[xX](?P<hex>[0-9a-fA-F]+)|[oO](?P<oct>[0-7]+)|[bB](?P<bin>[01]+))$").unwrap()
});

/// A validated problem size: finite, integral and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProblemSize(f64);

impl ProblemSize {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(RecurError::InvalidInput(Rejection::NotANumber));
        }
        if !value.is_finite() {
            return Err(RecurError::InvalidInput(Rejection::NotFinite));
        }
        if value.fract() != 0.0 {
            return Err(RecurError::InvalidInput(Rejection::NotAnInteger));
        }
        if value <= 0.0 {
            return Err(RecurError::InvalidInput(Rejection::NotPositive));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Parse raw input text into a [`ProblemSize`].
///
/// Surrounding whitespace is ignored and an empty string reads as zero.
/// Besides plain decimals (`8`, `+8`, `8.`, `.5`, `1e3`) the text may be
/// `Infinity` or an unsigned `0x`/`0o`/`0b` integer.
pub fn parse_input(raw: &str) -> Result<ProblemSize> {
    let text = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    ProblemSize::new(to_number(text))
}

/// Numeric value of `text`, NaN when it is not a number at all.
fn to_number(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    if DECIMAL.is_match(text) {
        return text.parse().unwrap_or(f64::NAN);
    }
    if INFINITY.is_match(text) {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if let Some(caps) = RADIX.captures(text) {
        let (digits, radix) = if let Some(m) = caps.name("hex") {
            (m.as_str(), 16)
        } else if let Some(m) = caps.name("oct") {
            (m.as_str(), 8)
        } else if let Some(m) = caps.name("bin") {
            (m.as_str(), 2)
        } else {
            return f64::NAN;
        };
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }
    f64::NAN
}
