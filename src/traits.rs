//! Capabilities the billing core expects from its collaborators

use async_trait::async_trait;

use crate::invoice::document::InvoiceDocument;
use crate::render::{RenderError, RenderedDocument};
use crate::types::*;

/// String key-value persistence, in the shape of browser local storage.
///
/// Implementations store whole serialized values per key; the stores built
/// on top read, modify and write back the full value.
pub trait KeyValueStore: Send + Sync {
    /// Raw value for a key, if present
    fn read(&self, key: &str) -> BillingResult<Option<String>>;

    /// Replace the value for a key
    fn write(&self, key: &str, value: String) -> BillingResult<()>;

    /// Remove a key; absent keys are not an error
    fn remove(&self, key: &str) -> BillingResult<()>;
}

/// Produces a viewable or downloadable document from an invoice.
///
/// A renderer either succeeds or fails as a whole; callers pick a fallback
/// with [`crate::render::render_with_fallback`].
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Render the invoice
    async fn render(&self, invoice: &InvoiceDocument) -> Result<RenderedDocument, RenderError>;
}

/// Trait for implementing custom line validation rules
pub trait LineItemValidator: Send + Sync {
    /// Validate a raw line before it is resolved
    fn validate_line(&self, index: usize, line: &LineItemInput) -> BillingResult<()>;

    /// Validate the raw discount fields of a bill
    fn validate_discount(&self, discount: &DiscountInput) -> BillingResult<()>;
}

/// Accepts everything; malformed values are coerced to zero on resolve
pub struct PermissiveLineItemValidator;

impl LineItemValidator for PermissiveLineItemValidator {
    fn validate_line(&self, _index: usize, _line: &LineItemInput) -> BillingResult<()> {
        Ok(())
    }

    fn validate_discount(&self, _discount: &DiscountInput) -> BillingResult<()> {
        Ok(())
    }
}
