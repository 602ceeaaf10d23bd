//! Money parsing, rounding and INR formatting
//!
//! Every amount that reaches the calculator passes through [`parse_money`] or
//! [`parse_quantity`], so malformed input turns into zero instead of an error.

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Free-form numeric input as it arrives from a form or stored JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A plain number
    Number(f64),
    /// Text such as `"₹1,23,456.78"` or `"10.5"`
    Text(String),
    /// An exact decimal supplied by library callers
    Exact(BigDecimal),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Exact(BigDecimal::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<BigDecimal> for NumericInput {
    fn from(value: BigDecimal) -> Self {
        NumericInput::Exact(value)
    }
}

/// Lenient money parsing.
///
/// Numbers pass through unchanged (negatives included). Text is stripped of
/// everything except digits, `.` and `-`, then its longest leading decimal
/// literal is read. Absent, empty or unreadable input yields zero.
pub fn parse_money(input: Option<&NumericInput>) -> BigDecimal {
    match input {
        None => BigDecimal::from(0),
        Some(NumericInput::Number(n)) => decimal_from_f64(*n),
        Some(NumericInput::Exact(d)) => d.clone(),
        Some(NumericInput::Text(text)) => {
            let cleaned: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            leading_decimal(&cleaned).unwrap_or_else(|| BigDecimal::from(0))
        }
    }
}

/// Strict numeric coercion for weights and discount fields.
///
/// Text must be a whole decimal literal after trimming, otherwise the value
/// is zero. Separators and currency symbols are not tolerated here.
pub fn parse_quantity(input: Option<&NumericInput>) -> BigDecimal {
    match input {
        None => BigDecimal::from(0),
        Some(NumericInput::Number(n)) => decimal_from_f64(*n),
        Some(NumericInput::Exact(d)) => d.clone(),
        Some(NumericInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return BigDecimal::from(0);
            }
            match leading_decimal(trimmed) {
                Some(value) if literal_len(trimmed) == trimmed.len() => value,
                _ => BigDecimal::from(0),
            }
        }
    }
}

/// Round to two decimal places, halves away from zero
pub fn round2(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// Format as rupees with Indian digit grouping and exactly two decimals,
/// e.g. `₹54,850.50`
pub fn format_inr(value: &BigDecimal) -> String {
    let (sign, whole, fraction) = split_rounded(value);
    format!("{sign}₹{}.{fraction}", group_indian(&whole))
}

/// Compact rupee format used on printed bills, e.g. `Rs 54,850.5`.
///
/// Up to two decimals are kept; trailing zeros and a bare point are dropped.
pub fn format_rs(value: &BigDecimal) -> String {
    let (sign, whole, fraction) = split_rounded(value);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("Rs {sign}{}", group_indian(&whole))
    } else {
        format!("Rs {sign}{}.{fraction}", group_indian(&whole))
    }
}

/// Group an unsigned digit string the Indian way: the last three digits,
/// then pairs (`12,34,567`)
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn decimal_from_f64(value: f64) -> BigDecimal {
    if !value.is_finite() {
        return BigDecimal::from(0);
    }
    // Display gives the shortest literal that round-trips, which keeps 0.1 as 0.1
    BigDecimal::from_str(&value.to_string()).unwrap_or_else(|_| BigDecimal::from(0))
}

/// Length in bytes of the longest leading `-?digits(.digits)?` literal
fn literal_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 || int_digits > 0 {
            end = frac_end;
        }
    }

    if int_digits == 0 && !text[..end].contains(|c: char| c.is_ascii_digit()) {
        return 0;
    }
    end
}

fn leading_decimal(text: &str) -> Option<BigDecimal> {
    let len = literal_len(text);
    if len == 0 {
        return None;
    }
    let literal = &text[..len];
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };
    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = match (negative, fraction.is_empty()) {
        (true, true) => format!("-{whole}"),
        (true, false) => format!("-{whole}.{fraction}"),
        (false, true) => whole.to_string(),
        (false, false) => format!("{whole}.{fraction}"),
    };
    BigDecimal::from_str(&normalized).ok()
}

/// Round to paise and split into sign, whole rupees and a two-digit fraction
fn split_rounded(value: &BigDecimal) -> (&'static str, String, String) {
    let rounded = round2(value);
    let negative = rounded < BigDecimal::from(0);
    let (paise, _) = rounded.as_bigint_and_exponent();
    let digits = paise.magnitude().to_string();
    let digits = format!("{digits:0>3}");
    let (whole, fraction) = digits.split_at(digits.len() - 2);
    let sign = if negative { "-" } else { "" };
    (sign, whole.to_string(), fraction.to_string())
}
