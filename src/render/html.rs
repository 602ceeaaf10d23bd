//! Printable HTML invoice

use async_trait::async_trait;
use std::fmt::{self, Write};

use crate::invoice::document::InvoiceDocument;
use crate::render::{RenderError, RenderedDocument};
use crate::traits::DocumentRenderer;
use crate::utils::money::{format_inr, format_rs};

/// Renders a self-contained HTML print view of an invoice
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the page markup
    pub fn to_html(&self, invoice: &InvoiceDocument) -> Result<String, fmt::Error> {
        let shop = &invoice.shop;
        let customer = &invoice.customer;
        let bank = &invoice.bank;
        let totals = &invoice.totals;
        let half_rate = invoice.tax_policy.sgst_rate().normalized();

        let mut html = String::new();
        html.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        writeln!(
            html,
            "<title>Invoice {}</title>",
            escape(&invoice.meta.invoice_no)
        )?;
        html.push_str("</head>\n<body>\n<div style=\"font-family: Arial; padding:20px; color:#111\">\n");

        writeln!(html, "<h2>{}</h2>", escape(&shop.display_name()))?;
        writeln!(
            html,
            "<div>PAN: {} &nbsp; GSTIN: {}</div>",
            escape(&shop.pan),
            escape(&shop.gstin)
        )?;
        writeln!(
            html,
            "<div>{}, {}, {} - {}</div>",
            escape(&shop.address_line1),
            escape(&shop.address_line2),
            escape(&shop.city_state),
            escape(&shop.pincode)
        )?;
        writeln!(
            html,
            "<div>Invoice No.: {} &nbsp; Date of Purchase: {}</div>",
            escape(&invoice.meta.invoice_no),
            invoice.formatted_date()
        )?;
        html.push_str("<hr/>\n<h3>Details of Customer (Billed To)</h3>\n");
        writeln!(html, "<div>Name: {}</div>", escape(&customer.name))?;
        writeln!(html, "<div>Contact: {}</div>", escape(&customer.contact))?;
        writeln!(html, "<div>Address: {}</div>", escape(&customer.address))?;

        html.push_str("<h3>Details of Purchase</h3>\n<table border=\"1\" cellpadding=\"6\" style=\"border-collapse:collapse\">\n");
        html.push_str("<tr><th>Description</th><th>Sl. No.</th><th>Hsn/Sac</th><th>Weight (in Gram)</th><th>Rate (per Gram)</th><th>Making Charges</th><th>Amount</th></tr>\n");
        for line in &invoice.lines {
            let description = if line.item.description.trim().is_empty() {
                "-".to_string()
            } else {
                escape(&line.item.description)
            };
            writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                description,
                line.sl_no,
                escape(&line.item.hsn_code),
                line.item.weight_grams.normalized(),
                format_rs(&line.item.rate_per_gram),
                format_rs(&line.item.making_charge),
                format_rs(&line.amount)
            )?;
        }
        html.push_str("</table>\n<hr/>\n");

        writeln!(html, "<div>Subtotal: {}</div>", format_inr(&totals.subtotal))?;
        writeln!(html, "<div>Discount: {}</div>", format_inr(&totals.discount))?;
        writeln!(html, "<div>Taxable Amount: {}</div>", format_inr(&totals.taxable))?;
        writeln!(html, "<div>SGST {half_rate}%: {}</div>", format_inr(&totals.sgst))?;
        writeln!(html, "<div>CGST {half_rate}%: {}</div>", format_inr(&totals.cgst))?;
        writeln!(
            html,
            "<div><strong>Grand Total: {}</strong></div>",
            format_inr(&totals.grand_total)
        )?;
        writeln!(
            html,
            "<div style=\"border:1px solid #000; padding:8px; margin-top:8px\">{}</div>",
            escape(&invoice.amount_in_words)
        )?;

        html.push_str("<hr/>\n");
        writeln!(
            html,
            "<div>Bank: {} | A/C: {} | IFSC: {} | Branch: {}</div>",
            escape(&bank.bank_name),
            escape(&bank.account_number),
            escape(&bank.ifsc),
            escape(&bank.branch)
        )?;

        if !invoice.footer_notes.is_empty() {
            let notes: Vec<String> = invoice.footer_notes.iter().map(|n| escape(n)).collect();
            writeln!(
                html,
                "<div style=\"margin-top:20px\">{}</div>",
                notes.join("<br/>")
            )?;
        }
        html.push_str("<div style=\"margin-top:40px; text-align:right\">Authorised Signatory</div>\n");
        html.push_str("</div>\n</body>\n</html>\n");
        Ok(html)
    }
}

#[async_trait]
impl DocumentRenderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    async fn render(&self, invoice: &InvoiceDocument) -> Result<RenderedDocument, RenderError> {
        let html = self
            .to_html(invoice)
            .map_err(|e| RenderError::Failed(format!("could not write invoice markup: {e}")))?;
        Ok(RenderedDocument {
            file_name: invoice.file_name("html"),
            media_type: "text/html".to_string(),
            bytes: html.into_bytes(),
            renderer: self.name().to_string(),
        })
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::calculator::InvoiceCalculator;
    use crate::invoice::document::InvoiceParties;
    use crate::types::*;
    use chrono::NaiveDate;

    fn invoice(customer_name: &str) -> InvoiceDocument {
        InvoiceDocument::assemble(
            InvoiceParties {
                shop: ShopProfile::default(),
                customer: Customer {
                    name: customer_name.to_string(),
                    ..Customer::default()
                },
                bank: BankDetails {
                    bank_name: "State Bank of India".to_string(),
                    ..BankDetails::default()
                },
                meta: InvoiceMeta {
                    invoice_no: "INV-000777".to_string(),
                    date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
                },
            },
            vec![LineItemInput::new("Gold chain", 10.5, 5200i64, 250i64).resolve()],
            &DiscountPolicy::none(),
            &InvoiceCalculator::default(),
            vec!["Weight & Pieces are verified and found ok.".to_string()],
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"R&D\"</b>"), "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_html_contains_bill_sections() {
        let html = HtmlRenderer::new().to_html(&invoice("Asha Verma")).unwrap();

        assert!(html.contains("<h2>Sangam Jewellers</h2>"));
        assert!(html.contains("Date of Purchase: 02/11/2025"));
        assert!(html.contains("Name: Asha Verma"));
        assert!(html.contains("<td>Rs 54,850</td>"));
        assert!(html.contains("SGST 1.5%: ₹822.75"));
        assert!(html.contains("Grand Total: ₹56,495.50"));
        assert!(html.contains("and 50/100 Paise Only"));
        assert!(html.contains("Bank: State Bank of India"));
        assert!(html.contains("Weight &amp; Pieces are verified and found ok."));
    }

    #[test]
    fn test_html_escapes_user_input() {
        let html = HtmlRenderer::new().to_html(&invoice("<script>alert(1)</script>")).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_render_produces_html_document() {
        let rendered = HtmlRenderer::new().render(&invoice("Asha")).await.unwrap();
        assert_eq!(rendered.file_name, "Sangam_INV-000777.html");
        assert_eq!(rendered.media_type, "text/html");
        assert_eq!(rendered.renderer, "html");
        assert!(String::from_utf8(rendered.bytes).unwrap().starts_with("<!doctype html>"));
    }
}
