//! Billing configuration
//!
//! Everything has a default matching the shop's printed bill, so callers only
//! override what differs. Configuration is read once and passed by reference.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::tax::gst::{TaxPolicy, JEWELLERY_GST_RATE};
use crate::types::{BillingError, BillingResult, ShopProfile, DEFAULT_HSN_CODE};

/// Settings for the billing desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingConfig {
    /// Total GST in percent, split evenly into SGST and CGST
    pub tax_rate_percent: BigDecimal,

    /// HSN/SAC code for lines that carry none
    pub default_hsn_code: String,

    /// Prefix of generated invoice numbers
    pub invoice_prefix: String,

    /// Seller printed in the header
    pub shop: ShopProfile,

    /// Lines printed at the foot of every invoice
    pub footer_notes: Vec<String>,
}

impl BillingConfig {
    /// Parse a JSON document, filling unspecified fields with defaults
    pub fn from_json_str(json: &str) -> BillingResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BillingError::Config(format!("invalid billing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the calculator cannot work with
    pub fn validate(&self) -> BillingResult<()> {
        TaxPolicy::intra_state(self.tax_rate_percent.clone()).validate()?;

        if self.default_hsn_code.trim().is_empty() {
            return Err(BillingError::Config(
                "default HSN code cannot be empty".to_string(),
            ));
        }

        if self.invoice_prefix.trim().is_empty() {
            return Err(BillingError::Config(
                "invoice prefix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Tax policy for the configured rate
    pub fn tax_policy(&self) -> TaxPolicy {
        TaxPolicy::intra_state(self.tax_rate_percent.clone())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: BigDecimal::from(JEWELLERY_GST_RATE),
            default_hsn_code: DEFAULT_HSN_CODE.to_string(),
            invoice_prefix: "INV".to_string(),
            shop: ShopProfile::default(),
            footer_notes: vec![
                "Weight & Pieces are verified and found ok.".to_string(),
                "All Subject to jurisdiction Only".to_string(),
            ],
        }
    }
}
