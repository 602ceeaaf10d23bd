//! GST (Goods and Services Tax) split for intra-state jewellery sales

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::money::round2;

/// Total GST rate on gold and silver jewellery, in percent
pub const JEWELLERY_GST_RATE: i64 = 3;

/// GST rate applied to the taxable amount.
///
/// The total rate is split evenly into SGST and CGST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Total GST rate percentage (e.g., 3 for 3%)
    pub total_rate: BigDecimal,
}

impl TaxPolicy {
    /// Intra-state policy with the given total rate
    pub fn intra_state(total_rate: BigDecimal) -> Self {
        Self { total_rate }
    }

    /// The 3% jewellery rate (1.5% SGST + 1.5% CGST)
    pub fn jewellery() -> Self {
        Self::intra_state(BigDecimal::from(JEWELLERY_GST_RATE))
    }

    /// SGST rate percentage (State GST)
    pub fn sgst_rate(&self) -> BigDecimal {
        &self.total_rate / BigDecimal::from(2)
    }

    /// CGST rate percentage (Central GST)
    pub fn cgst_rate(&self) -> BigDecimal {
        &self.total_rate / BigDecimal::from(2)
    }

    /// Validate that the rate is a usable percentage
    pub fn validate(&self) -> Result<(), GstError> {
        if self.total_rate < BigDecimal::from(0) {
            return Err(GstError::InvalidRate(format!(
                "GST rate cannot be negative: {}",
                self.total_rate
            )));
        }

        if self.total_rate > BigDecimal::from(100) {
            return Err(GstError::InvalidRate(format!(
                "GST rate cannot exceed 100%: {}",
                self.total_rate
            )));
        }

        Ok(())
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::jewellery()
    }
}

/// SGST and CGST on a taxable amount, each rounded to paise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSplit {
    pub sgst: BigDecimal,
    pub cgst: BigDecimal,
}

impl GstSplit {
    /// Calculate both halves of the tax on `taxable`
    pub fn calculate(taxable: &BigDecimal, policy: &TaxPolicy) -> Self {
        let sgst = round2(&(taxable * policy.sgst_rate() / BigDecimal::from(100)));
        let cgst = round2(&(taxable * policy.cgst_rate() / BigDecimal::from(100)));
        Self { sgst, cgst }
    }

    /// SGST + CGST
    pub fn total(&self) -> BigDecimal {
        &self.sgst + &self.cgst
    }
}

/// GST-related errors
#[derive(Debug, thiserror::Error)]
pub enum GstError {
    #[error("Invalid GST rate: {0}")]
    InvalidRate(String),
}
