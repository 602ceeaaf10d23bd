//! Core types and data structures for billing

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::money::{parse_money, parse_quantity, round2, NumericInput};

/// HSN/SAC code printed when a line carries none
pub const DEFAULT_HSN_CODE: &str = "9997";

/// A bill line exactly as the billing form holds it.
///
/// Values are free-form; nothing is validated until the line is resolved
/// into a [`LineItem`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub description: String,
    pub hsn_code: Option<String>,
    pub weight_grams: Option<NumericInput>,
    pub rate_per_gram: Option<NumericInput>,
    pub making_charge: Option<NumericInput>,
}

impl LineItemInput {
    /// A blank line carrying the default HSN code
    pub fn blank() -> Self {
        Self {
            hsn_code: Some(DEFAULT_HSN_CODE.to_string()),
            ..Self::default()
        }
    }

    /// Convenience constructor for a fully specified line
    pub fn new(
        description: impl Into<String>,
        weight_grams: impl Into<NumericInput>,
        rate_per_gram: impl Into<NumericInput>,
        making_charge: impl Into<NumericInput>,
    ) -> Self {
        Self {
            description: description.into(),
            hsn_code: Some(DEFAULT_HSN_CODE.to_string()),
            weight_grams: Some(weight_grams.into()),
            rate_per_gram: Some(rate_per_gram.into()),
            making_charge: Some(making_charge.into()),
        }
    }

    /// Coerce the raw values into a calculable line
    pub fn resolve(&self) -> LineItem {
        let hsn_code = self
            .hsn_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_HSN_CODE)
            .to_string();

        LineItem {
            description: self.description.clone(),
            hsn_code,
            weight_grams: parse_quantity(self.weight_grams.as_ref()),
            rate_per_gram: parse_money(self.rate_per_gram.as_ref()),
            making_charge: parse_money(self.making_charge.as_ref()),
        }
    }
}

/// A resolved invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub hsn_code: String,
    pub weight_grams: BigDecimal,
    pub rate_per_gram: BigDecimal,
    pub making_charge: BigDecimal,
}

impl LineItem {
    /// `round2(rate * weight + making)`. Negative inputs are not rejected.
    pub fn amount(&self) -> BigDecimal {
        round2(&(&self.rate_per_gram * &self.weight_grams + &self.making_charge))
    }
}

impl From<&LineItemInput> for LineItem {
    fn from(input: &LineItemInput) -> Self {
        input.resolve()
    }
}

/// Discount applied to the subtotal before tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Percentage of the subtotal; wins whenever it is above zero
    pub percent: BigDecimal,
    /// Flat amount, used only when `percent <= 0`
    pub absolute: BigDecimal,
}

impl DiscountPolicy {
    /// No discount at all
    pub fn none() -> Self {
        Self {
            percent: BigDecimal::from(0),
            absolute: BigDecimal::from(0),
        }
    }

    /// Percentage discount
    pub fn percent(percent: BigDecimal) -> Self {
        Self {
            percent,
            absolute: BigDecimal::from(0),
        }
    }

    /// Flat discount
    pub fn absolute(absolute: BigDecimal) -> Self {
        Self {
            percent: BigDecimal::from(0),
            absolute,
        }
    }

    /// Unclamped discount for a subtotal; the calculator clamps it
    pub fn raw_discount(&self, subtotal: &BigDecimal) -> BigDecimal {
        if self.percent > BigDecimal::from(0) {
            subtotal * &self.percent / BigDecimal::from(100)
        } else {
            self.absolute.clone()
        }
    }
}

/// Discount fields exactly as the billing form holds them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    pub percent: Option<NumericInput>,
    pub amount: Option<NumericInput>,
}

impl DiscountInput {
    /// Percent is read as a plain quantity, the flat amount as money
    pub fn resolve(&self) -> DiscountPolicy {
        DiscountPolicy {
            percent: parse_quantity(self.percent.as_ref()),
            absolute: parse_money(self.amount.as_ref()),
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Invoice totals, each rounded to two decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub taxable: BigDecimal,
    pub sgst: BigDecimal,
    pub cgst: BigDecimal,
    pub grand_total: BigDecimal,
}

impl InvoiceTotals {
    /// All-zero totals, as produced by an empty bill
    pub fn zero() -> Self {
        let zero = round2(&BigDecimal::from(0));
        Self {
            subtotal: zero.clone(),
            discount: zero.clone(),
            taxable: zero.clone(),
            sgst: zero.clone(),
            cgst: zero.clone(),
            grand_total: zero,
        }
    }

    /// Combined SGST and CGST
    pub fn total_tax(&self) -> BigDecimal {
        &self.sgst + &self.cgst
    }
}

/// Seller details printed in the invoice header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopProfile {
    pub name_line1: String,
    pub name_line2: String,
    pub pan: String,
    pub gstin: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city_state: String,
    pub pincode: String,
}

impl ShopProfile {
    /// Both name lines joined, e.g. "Sangam Jewellers"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name_line1, self.name_line2)
            .trim()
            .to_string()
    }
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name_line1: "Sangam".to_string(),
            name_line2: "Jewellers".to_string(),
            pan: "AJEPD7294C".to_string(),
            gstin: "09Axxxxxxxxx".to_string(),
            address_line1: "Tedwa Kuti, Near Reliance Trends".to_string(),
            address_line2: "Farenda Road, Maharajganj".to_string(),
            city_state: "Uttar Pradesh, India".to_string(),
            pincode: "273301".to_string(),
        }
    }
}

/// Billed-to party
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub contact: String,
    pub address: String,
}

/// Bank account printed for payment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub branch: String,
}

/// Invoice number and date of purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMeta {
    pub invoice_no: String,
    pub date: NaiveDate,
}

/// Errors raised by the collaborators around the calculator
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Product ID already exists: {0}")]
    DuplicateProduct(String),
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Line not found at index {0}")]
    LineNotFound(usize),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Tax(#[from] crate::tax::gst::GstError),
}

/// Result type for billing operations
pub type BillingResult<T> = Result<T, BillingError>;
