//! # Jewellery Billing
//!
//! Billing and back-office logic for a jewellery storefront: invoice totals
//! with a discount and intra-state GST split, the grand total in words using
//! Indian numbering, and product and order stores over a pluggable key-value
//! store.
//!
//! ## Features
//!
//! - **Invoice computation**: weight × rate + making charge per line, discount, SGST/CGST
//! - **Amount in words**: Thousand / Lakh / Crore grouping with paise
//! - **Bill form**: editable lines and parties assembled into an invoice document
//! - **Rendering**: async renderer trait with a built-in HTML print view and fallback
//! - **Stores**: products, orders and sales analytics on any [`KeyValueStore`]
//!
//! ## Quick Start
//!
//! ```rust
//! use jewellery_billing::{compute_totals, amount_in_words, DiscountPolicy, LineItemInput, TaxPolicy};
//!
//! let line = LineItemInput::new("Gold chain 22K", 10.5, "5200", "250").resolve();
//! let totals = compute_totals(&[line], &DiscountPolicy::none(), &TaxPolicy::jewellery());
//!
//! assert_eq!(totals.grand_total.to_string(), "56495.50");
//! assert!(amount_in_words(&totals.grand_total).starts_with("Fifty Six Thousand"));
//! ```

pub mod config;
pub mod invoice;
pub mod render;
pub mod store;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::BillingConfig;
pub use invoice::*;
pub use render::{render_with_fallback, HtmlRenderer, RenderError, RenderedDocument};
pub use tax::gst::*;
pub use traits::*;
pub use types::*;
pub use utils::money::{format_inr, format_rs, parse_money, parse_quantity, round2, NumericInput};
