//! Editable bill, as the billing desk fills it in

use chrono::{Local, Utc};
use tracing::debug;

use crate::config::BillingConfig;
use crate::invoice::calculator::InvoiceCalculator;
use crate::invoice::document::{generate_invoice_number, InvoiceDocument, InvoiceParties};
use crate::traits::LineItemValidator;
use crate::types::*;
use crate::utils::money::NumericInput;

/// A bill being edited.
///
/// Holds raw line input; nothing is coerced until totals are requested or
/// the bill is turned into an [`InvoiceDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct BillForm {
    shop: ShopProfile,
    customer: Customer,
    bank: BankDetails,
    meta: InvoiceMeta,
    discount: DiscountInput,
    lines: Vec<LineItemInput>,
    default_hsn_code: String,
    footer_notes: Vec<String>,
}

impl BillForm {
    /// Fresh bill with the default shop, today's date and one blank line
    pub fn new() -> Self {
        Self::from_config(&BillingConfig::default())
    }

    /// Fresh bill using the configured shop, prefix and HSN code
    pub fn from_config(config: &BillingConfig) -> Self {
        let meta = InvoiceMeta {
            invoice_no: generate_invoice_number(&config.invoice_prefix, Utc::now()),
            date: Local::now().date_naive(),
        };
        let mut form = Self {
            shop: config.shop.clone(),
            customer: Customer::default(),
            bank: BankDetails::default(),
            meta,
            discount: DiscountInput::default(),
            lines: Vec::new(),
            default_hsn_code: config.default_hsn_code.clone(),
            footer_notes: config.footer_notes.clone(),
        };
        form.add_line();
        form
    }

    pub fn shop(&self) -> &ShopProfile {
        &self.shop
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn bank(&self) -> &BankDetails {
        &self.bank
    }

    pub fn meta(&self) -> &InvoiceMeta {
        &self.meta
    }

    pub fn lines(&self) -> &[LineItemInput] {
        &self.lines
    }

    pub fn set_shop(&mut self, shop: ShopProfile) {
        self.shop = shop;
    }

    pub fn set_customer(&mut self, customer: Customer) {
        self.customer = customer;
    }

    pub fn set_bank(&mut self, bank: BankDetails) {
        self.bank = bank;
    }

    pub fn set_meta(&mut self, meta: InvoiceMeta) {
        self.meta = meta;
    }

    /// Discount as a percentage of the subtotal
    pub fn set_discount_percent(&mut self, value: impl Into<NumericInput>) {
        self.discount.percent = Some(value.into());
    }

    /// Flat discount, used only while the percentage is zero
    pub fn set_discount_amount(&mut self, value: impl Into<NumericInput>) {
        self.discount.amount = Some(value.into());
    }

    pub fn set_footer_notes(&mut self, notes: Vec<String>) {
        self.footer_notes = notes;
    }

    /// Append a blank line and return its index
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineItemInput {
            hsn_code: Some(self.default_hsn_code.clone()),
            ..LineItemInput::default()
        });
        self.lines.len() - 1
    }

    /// Append a filled-in line and return its index
    pub fn push_line(&mut self, line: LineItemInput) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// Edit the line at `index` in place
    pub fn update_line<F>(&mut self, index: usize, edit: F) -> BillingResult<()>
    where
        F: FnOnce(&mut LineItemInput),
    {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(BillingError::LineNotFound(index))?;
        edit(line);
        Ok(())
    }

    /// Remove and return the line at `index`
    pub fn remove_line(&mut self, index: usize) -> BillingResult<LineItemInput> {
        if index >= self.lines.len() {
            return Err(BillingError::LineNotFound(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Raw discount fields
    pub fn discount(&self) -> &DiscountInput {
        &self.discount
    }

    /// Discount fields coerced for the calculator
    pub fn discount_policy(&self) -> DiscountPolicy {
        self.discount.resolve()
    }

    /// Resolved lines in form order
    pub fn resolved_lines(&self) -> Vec<LineItem> {
        self.lines.iter().map(LineItem::from).collect()
    }

    /// Live totals for the current input
    pub fn totals(&self, calculator: &InvoiceCalculator) -> InvoiceTotals {
        calculator.compute_totals(&self.resolved_lines(), &self.discount_policy())
    }

    /// Assemble the invoice, coercing malformed values to zero
    pub fn to_document(&self, calculator: &InvoiceCalculator) -> InvoiceDocument {
        InvoiceDocument::assemble(
            InvoiceParties {
                shop: self.shop.clone(),
                customer: self.customer.clone(),
                bank: self.bank.clone(),
                meta: self.meta.clone(),
            },
            self.resolved_lines(),
            &self.discount_policy(),
            calculator,
            self.footer_notes.clone(),
        )
    }

    /// Assemble the invoice after every line and the discount pass `validator`
    pub fn to_document_validated(
        &self,
        calculator: &InvoiceCalculator,
        validator: &dyn LineItemValidator,
    ) -> BillingResult<InvoiceDocument> {
        for (index, line) in self.lines.iter().enumerate() {
            validator.validate_line(index, line)?;
        }
        validator.validate_discount(&self.discount)?;

        debug!(invoice_no = %self.meta.invoice_no, lines = self.lines.len(), "Bill validated");
        Ok(self.to_document(calculator))
    }
}

impl Default for BillForm {
    fn default() -> Self {
        Self::new()
    }
}
