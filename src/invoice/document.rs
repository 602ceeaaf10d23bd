//! Invoice document assembled from a bill, ready to hand to a renderer

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::invoice::calculator::InvoiceCalculator;
use crate::invoice::words::amount_in_words;
use crate::tax::gst::TaxPolicy;
use crate::types::*;

/// A numbered line with its computed amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    /// Serial number, starting at 1
    pub sl_no: usize,
    pub item: LineItem,
    pub amount: BigDecimal,
}

/// Everything printed on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub shop: ShopProfile,
    pub customer: Customer,
    pub bank: BankDetails,
    pub meta: InvoiceMeta,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    pub tax_policy: TaxPolicy,
    /// Grand total in words
    pub amount_in_words: String,
    pub footer_notes: Vec<String>,
}

/// Parties and metadata of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceParties {
    pub shop: ShopProfile,
    pub customer: Customer,
    pub bank: BankDetails,
    pub meta: InvoiceMeta,
}

impl InvoiceDocument {
    /// Number the lines, compute totals and spell out the grand total
    pub fn assemble(
        parties: InvoiceParties,
        lines: Vec<LineItem>,
        discount: &DiscountPolicy,
        calculator: &InvoiceCalculator,
        footer_notes: Vec<String>,
    ) -> Self {
        let totals = calculator.compute_totals(&lines, discount);
        let amount_in_words = amount_in_words(&totals.grand_total);

        let lines: Vec<InvoiceLine> = lines
            .into_iter()
            .enumerate()
            .map(|(index, item)| InvoiceLine {
                sl_no: index + 1,
                amount: calculator.line_amount(&item),
                item,
            })
            .collect();

        info!(
            invoice_no = %parties.meta.invoice_no,
            lines = lines.len(),
            grand_total = %totals.grand_total,
            "Assembled invoice"
        );

        Self {
            shop: parties.shop,
            customer: parties.customer,
            bank: parties.bank,
            meta: parties.meta,
            lines,
            totals,
            tax_policy: calculator.tax_policy().clone(),
            amount_in_words,
            footer_notes,
        }
    }

    /// Invoice date as printed, `DD/MM/YYYY`
    pub fn formatted_date(&self) -> String {
        format_bill_date(self.meta.date)
    }

    /// Output file name, e.g. `Sangam_INV-123456.pdf`
    pub fn file_name(&self, extension: &str) -> String {
        let stem: String = self
            .shop
            .name_line1
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '\\'))
            .collect();
        let invoice: String = self
            .meta
            .invoice_no
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '\\'))
            .collect();
        match (stem.is_empty(), invoice.is_empty()) {
            (true, true) => format!("invoice.{extension}"),
            (true, false) => format!("{invoice}.{extension}"),
            (false, true) => format!("{stem}.{extension}"),
            (false, false) => format!("{stem}_{invoice}.{extension}"),
        }
    }
}

/// Invoice number from a clock reading: prefix plus the last six digits of
/// the epoch milliseconds, e.g. `INV-482913`
pub fn generate_invoice_number(prefix: &str, now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().unsigned_abs();
    format!("{prefix}-{:06}", millis % 1_000_000)
}

/// `DD/MM/YYYY`
pub fn format_bill_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
