//! Validation utilities
//!
//! The calculator itself never rejects input. These checks are for callers
//! that would rather surface a [`BillingError::Validation`] than bill a rate
//! of "abc" as zero.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::traits::*;
use crate::types::*;
use crate::utils::money::NumericInput;

/// Validate that an amount is not negative
pub fn validate_non_negative(field: &str, amount: &BigDecimal) -> BillingResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(BillingError::Validation(format!(
            "{field} cannot be negative"
        )))
    } else {
        Ok(())
    }
}

/// Strictly read a money value: a number, or text that is a plain decimal
/// once a leading `₹`/`Rs`/`Rs.`, spaces and thousands separators are removed
pub fn strict_money(field: &str, input: Option<&NumericInput>) -> BillingResult<BigDecimal> {
    match input {
        None => Ok(BigDecimal::from(0)),
        Some(NumericInput::Number(n)) => strict_number(field, *n),
        Some(NumericInput::Exact(d)) => Ok(d.clone()),
        Some(NumericInput::Text(text)) => {
            let trimmed = text.trim();
            let unprefixed = trimmed
                .strip_prefix('₹')
                .or_else(|| trimmed.strip_prefix("Rs."))
                .or_else(|| trimmed.strip_prefix("Rs"))
                .unwrap_or(trimmed);
            let cleaned: String = unprefixed
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            strict_literal(field, text, &cleaned)
        }
    }
}

/// Strictly read a quantity: a number, or text that is a plain decimal
pub fn strict_quantity(field: &str, input: Option<&NumericInput>) -> BillingResult<BigDecimal> {
    match input {
        None => Ok(BigDecimal::from(0)),
        Some(NumericInput::Number(n)) => strict_number(field, *n),
        Some(NumericInput::Exact(d)) => Ok(d.clone()),
        Some(NumericInput::Text(text)) => strict_literal(field, text, text.trim()),
    }
}

fn strict_number(field: &str, value: f64) -> BillingResult<BigDecimal> {
    if !value.is_finite() {
        return Err(BillingError::Validation(format!(
            "{field} must be a finite number"
        )));
    }
    BigDecimal::from_str(&value.to_string())
        .map_err(|_| BillingError::Validation(format!("{field} is not a number")))
}

fn strict_literal(field: &str, original: &str, literal: &str) -> BillingResult<BigDecimal> {
    if literal.is_empty() {
        return Ok(BigDecimal::from(0));
    }
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let well_formed = !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());

    if !well_formed {
        return Err(BillingError::Validation(format!(
            "{field} is not a valid amount: '{original}'"
        )));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    let sign = if negative { "-" } else { "" };
    BigDecimal::from_str(&format!("{sign}{whole}.{fraction}"))
        .map_err(|_| BillingError::Validation(format!("{field} is not a valid amount: '{original}'")))
}

/// Validate a line description
pub fn validate_description(description: &str) -> BillingResult<()> {
    if description.chars().count() > 200 {
        return Err(BillingError::Validation(
            "Line description cannot exceed 200 characters".to_string(),
        ));
    }
    Ok(())
}

/// Rejects unreadable or negative line values and out-of-range discounts
pub struct StrictLineItemValidator;

impl LineItemValidator for StrictLineItemValidator {
    fn validate_line(&self, index: usize, line: &LineItemInput) -> BillingResult<()> {
        let field = |name: &str| format!("Line {} {name}", index + 1);

        validate_description(&line.description)?;

        let weight = strict_quantity(&field("weight"), line.weight_grams.as_ref())?;
        validate_non_negative(&field("weight"), &weight)?;

        let rate = strict_money(&field("rate"), line.rate_per_gram.as_ref())?;
        validate_non_negative(&field("rate"), &rate)?;

        let making = strict_money(&field("making charge"), line.making_charge.as_ref())?;
        validate_non_negative(&field("making charge"), &making)?;

        Ok(())
    }

    fn validate_discount(&self, discount: &DiscountInput) -> BillingResult<()> {
        let percent = strict_quantity("Discount percent", discount.percent.as_ref())?;
        validate_non_negative("Discount percent", &percent)?;
        if percent > BigDecimal::from(100) {
            return Err(BillingError::Validation(
                "Discount percent cannot exceed 100".to_string(),
            ));
        }

        let amount = strict_money("Discount amount", discount.amount.as_ref())?;
        validate_non_negative("Discount amount", &amount)
    }
}
