//! Numeric range compiler
//!
//! Turns an integer threshold into the shortest digit pattern that matches
//! every value at or above it. Values are bounded to three digits; everything
//! from 200 up collapses into one pattern.

use serde::{Deserialize, Serialize};

/// Compile `threshold` into a digit pattern.
///
/// Zero means "no constraint" and yields an empty pattern.
pub fn compile(threshold: u32) -> String {
    match threshold {
        0 => String::new(),
        t if t >= 200 => "2..".to_string(),
        t if t > 100 => compile_hundreds(t),
        100 => r"(\d{3})".to_string(),
        t if t > 9 => compile_tens(t),
        t => format!(r"([{t}-9]|\d..?)"),
    }
}

/// 101..=199
fn compile_hundreds(threshold: u32) -> String {
    let d0 = threshold / 100;
    let d1 = threshold / 10 % 10;
    let d2 = threshold % 10;

    match (d1, d2) {
        (0, 0) => format!("{d0}.."),
        (_, 0) => format!("1[{d1}-9]."),
        (0, _) => format!(r"(\d0[{d2}-9]|\d[1-9].)"),
        (9, 9) => "199".to_string(),
        (9, _) => format!("19[{d2}-9]"),
        _ => format!("1([{d1}-9][{d2}-9]|[{}-9].)", d1 + 1),
    }
}

/// 10..=99
fn compile_tens(threshold: u32) -> String {
    let d0 = threshold / 10;
    let d1 = threshold % 10;

    if d1 == 0 {
        format!("([{d0}-9].|1..)")
    } else if d0 == 9 {
        format!("(9[{d1}-9]|1..)")
    } else {
        format!("({d0}[{d1}-9]|[{}-9].|1..)", d0 + 1)
    }
}

/// Shorten single-step character classes. Applied once to a finished query.
pub fn simplify_classes(query: &str) -> String {
    query.replace("[8-9]", "[89]").replace("[9-9]", "9")
}

/// A numeric threshold as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericSetting {
    /// Free-form text; only its ASCII digits are used
    pub digits: String,
    /// Round the threshold down to the nearest multiple of 10
    pub relax: bool,
}

impl NumericSetting {
    pub fn new(digits: &str, relax: bool) -> Self {
        Self {
            digits: digits.to_string(),
            relax,
        }
    }

    /// Threshold value of the setting, 0 when the text holds no digits.
    /// Oversized input saturates instead of wrapping.
    pub fn threshold(&self) -> u32 {
        let value = self
            .digits
            .chars()
            .filter_map(|c| c.to_digit(10))
            .fold(0_u32, |acc, d| acc.saturating_mul(10).saturating_add(d));

        if self.relax {
            value / 10 * 10
        } else {
            value
        }
    }

    /// Compiled pattern for this setting, empty when unconstrained
    pub fn pattern(&self) -> String {
        compile(self.threshold())
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
