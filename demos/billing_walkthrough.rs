//! Billing desk walkthrough: fill a bill, print totals and render it

use jewellery_billing::{
    format_inr, render_with_fallback, BillForm, BillingConfig, Customer, DocumentRenderer,
    HtmlRenderer, InvoiceCalculator, InvoiceDocument, LineItemInput, RenderError,
    RenderedDocument,
};

/// A PDF engine that is never available in this demo
struct OfflinePdfRenderer;

#[async_trait::async_trait]
impl DocumentRenderer for OfflinePdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    async fn render(&self, _invoice: &InvoiceDocument) -> Result<RenderedDocument, RenderError> {
        Err(RenderError::Unavailable("no PDF engine configured".to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("💍 Jewellery Billing - Billing Walkthrough\n");

    let config = BillingConfig::default();
    let calculator = InvoiceCalculator::from_config(&config)?;

    // 1. Fill in the bill
    let mut form = BillForm::from_config(&config);
    form.set_customer(Customer {
        name: "Asha Verma".to_string(),
        contact: "9876543210".to_string(),
        address: "Civil Lines, Gorakhpur".to_string(),
    });
    form.update_line(0, |line| {
        *line = LineItemInput::new("Gold chain 22K", 10.5, "₹5,200", "250");
    })?;
    form.push_line(LineItemInput::new("Silver anklet pair", "42.35", "92.40", "Rs 180"));

    println!("🧾 Lines:");
    for (index, line) in form.resolved_lines().iter().enumerate() {
        println!(
            "  {}. {} ({} g × {}) + {} = {}",
            index + 1,
            line.description,
            line.weight_grams,
            format_inr(&line.rate_per_gram),
            format_inr(&line.making_charge),
            format_inr(&line.amount())
        );
    }
    println!();

    // 2. Totals without and with a discount
    let totals = form.totals(&calculator);
    println!("📊 Without discount:");
    println!("  Subtotal:    {}", format_inr(&totals.subtotal));
    println!("  SGST:        {}", format_inr(&totals.sgst));
    println!("  CGST:        {}", format_inr(&totals.cgst));
    println!("  Grand total: {}", format_inr(&totals.grand_total));
    println!();

    form.set_discount_percent("10");
    let document = form.to_document(&calculator);
    println!("🏷️  With 10% discount:");
    println!("  Discount:    {}", format_inr(&document.totals.discount));
    println!("  Taxable:     {}", format_inr(&document.totals.taxable));
    println!("  Grand total: {}", format_inr(&document.totals.grand_total));
    println!("  In words:    {}", document.amount_in_words);
    println!();

    // 3. Render, falling back to HTML
    let rendered = render_with_fallback(&OfflinePdfRenderer, &HtmlRenderer::new(), &document).await?;
    println!(
        "🖨️  Rendered {} ({} bytes, {} renderer)",
        rendered.file_name,
        rendered.bytes.len(),
        rendered.renderer
    );

    Ok(())
}
