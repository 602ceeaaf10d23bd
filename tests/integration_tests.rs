//! Integration tests for jewellery-billing

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use jewellery_billing::{
    amount_in_words, compute_totals, render_with_fallback,
    store::{
        CartItem, CartStore, DeliveryAddress, NewProduct, OrderStatus, OrderStore, ProductFilter,
        ProductStore, SortOrder, WishlistStore,
    },
    utils::{MemoryStore, StrictLineItemValidator},
    BillForm, BillingConfig, BillingError, Customer, DiscountPolicy, DocumentRenderer,
    HtmlRenderer, InvoiceCalculator, InvoiceDocument, InvoiceMeta, InvoiceTotals, LineItemInput,
    NumericInput, RenderError, RenderedDocument, TaxPolicy,
};
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

/// Stands in for a PDF engine that could not be loaded
struct MissingPdfRenderer;

#[async_trait]
impl DocumentRenderer for MissingPdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    async fn render(&self, _invoice: &InvoiceDocument) -> Result<RenderedDocument, RenderError> {
        Err(RenderError::Unavailable("PDF engine not loaded".to_string()))
    }
}

fn chain() -> LineItemInput {
    LineItemInput::new("Gold chain 22K", 10.5, "5200", "250")
}

#[tokio::test]
async fn test_complete_billing_workflow() {
    let config = BillingConfig::default();
    let calculator = InvoiceCalculator::from_config(&config).unwrap();

    let mut form = BillForm::from_config(&config);
    form.set_customer(Customer {
        name: "Asha Verma".to_string(),
        contact: "9876543210".to_string(),
        address: "Civil Lines, Gorakhpur".to_string(),
    });
    form.set_meta(InvoiceMeta {
        invoice_no: "INV-000042".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
    });
    form.update_line(0, |line| *line = chain()).unwrap();
    form.set_discount_percent("10");

    // Live totals match the assembled document
    let live = form.totals(&calculator);
    let document = form
        .to_document_validated(&calculator, &StrictLineItemValidator)
        .unwrap();
    assert_eq!(document.totals, live);

    assert_eq!(document.totals.subtotal, dec("54850.00"));
    assert_eq!(document.totals.discount, dec("5485.00"));
    assert_eq!(document.totals.taxable, dec("49365.00"));
    assert_eq!(document.totals.sgst, dec("740.48"));
    assert_eq!(document.totals.cgst, dec("740.48"));
    assert_eq!(document.totals.grand_total, dec("50845.96"));
    assert_eq!(
        document.amount_in_words,
        "Fifty Thousand Eight Hundred and Forty Five Rupees and 96/100 Paise Only"
    );

    // The primary renderer is missing, so the HTML view is produced instead
    let rendered = render_with_fallback(&MissingPdfRenderer, &HtmlRenderer::new(), &document)
        .await
        .unwrap();
    assert_eq!(rendered.renderer, "html");
    assert_eq!(rendered.media_type, "text/html");
    assert_eq!(rendered.file_name, "Sangam_INV-000042.html");

    let html = String::from_utf8(rendered.bytes).unwrap();
    assert!(html.contains("Asha Verma"));
    assert!(html.contains("07/03/2025"));
}

#[tokio::test]
async fn test_primary_renderer_used_when_available() {
    let document = BillForm::new().to_document(&InvoiceCalculator::default());
    let rendered = render_with_fallback(&HtmlRenderer::new(), &MissingPdfRenderer, &document)
        .await
        .unwrap();
    assert_eq!(rendered.renderer, "html");
}

#[tokio::test]
async fn test_both_renderers_failing_returns_fallback_error() {
    let document = BillForm::new().to_document(&InvoiceCalculator::default());
    let result = render_with_fallback(&MissingPdfRenderer, &MissingPdfRenderer, &document).await;
    assert!(matches!(result, Err(RenderError::Unavailable(_))));
}

#[test]
fn test_empty_bill_totals_are_zero() {
    let totals = compute_totals(&[], &DiscountPolicy::percent(dec("10")), &TaxPolicy::jewellery());
    assert_eq!(totals, InvoiceTotals::zero());
}

#[test]
fn test_line_amounts_are_non_negative_and_rounded() {
    let cases = [
        ("0", "0", "0", "0"),
        ("1.333", "3", "0", "4.00"),
        ("7250.75", "2.345", "99.99", "17103.00"),
        ("92.4", "42.35", "180", "4093.14"),
    ];
    for (rate, weight, making, expected) in cases {
        let line = LineItemInput::new("Piece", weight, rate, making).resolve();
        let amount = line.amount();
        assert_eq!(amount, dec(expected), "rate {rate} weight {weight} making {making}");
        assert!(amount >= BigDecimal::from(0));
    }
}

#[test]
fn test_discount_precedence_and_clamp() {
    let lines = vec![chain().resolve()];
    let tax = TaxPolicy::jewellery();

    let percent_wins = compute_totals(
        &lines,
        &DiscountPolicy {
            percent: dec("10"),
            absolute: dec("100"),
        },
        &tax,
    );
    assert_eq!(percent_wins.discount, dec("5485"));

    let absolute = compute_totals(
        &lines,
        &DiscountPolicy {
            percent: dec("0"),
            absolute: dec("100"),
        },
        &tax,
    );
    assert_eq!(absolute.discount, dec("100"));

    let negative = compute_totals(&lines, &DiscountPolicy::absolute(dec("-500")), &tax);
    assert_eq!(negative.discount, BigDecimal::from(0));

    let oversized = compute_totals(&lines, &DiscountPolicy::absolute(dec("1000000")), &tax);
    assert_eq!(oversized.discount, oversized.subtotal);
    assert!(oversized.taxable >= BigDecimal::from(0));
}

#[test]
fn test_negative_subtotal_never_yields_negative_discount() {
    let exchange = LineItemInput::new("Old gold exchange", "2", "-5200", "0").resolve();
    let tax = TaxPolicy::jewellery();

    for policy in [
        DiscountPolicy::absolute(dec("500")),
        DiscountPolicy::percent(dec("10")),
        DiscountPolicy::none(),
    ] {
        let totals = compute_totals(&[exchange.clone()], &policy, &tax);
        assert_eq!(totals.subtotal, dec("-10400"));
        assert!(totals.discount >= BigDecimal::from(0));
        assert!(totals.taxable >= BigDecimal::from(0));
        assert!(totals.grand_total >= BigDecimal::from(0));
    }
}

#[test]
fn test_currency_formatted_discount_through_form() {
    let calculator = InvoiceCalculator::default();
    let mut form = BillForm::new();
    form.update_line(0, |line| *line = chain()).unwrap();
    form.set_discount_amount("₹1,000");

    let document = form
        .to_document_validated(&calculator, &StrictLineItemValidator)
        .unwrap();
    assert_eq!(document.totals.discount, dec("1000"));
    assert_eq!(document.totals.taxable, dec("53850"));
    assert_eq!(document.totals.grand_total, dec("55465.50"));
}

#[test]
fn test_tax_split_symmetry() {
    let tax = TaxPolicy::jewellery();
    for absolute in ["0", "1", "333.33", "5485", "12345.67"] {
        let totals = compute_totals(&[chain().resolve()], &DiscountPolicy::absolute(dec(absolute)), &tax);
        assert_eq!(totals.sgst, totals.cgst);
        assert_eq!(
            totals.sgst,
            (&totals.taxable * dec("0.015")).with_scale_round(2, bigdecimal::RoundingMode::HalfUp)
        );
        assert_eq!(totals.grand_total, &totals.taxable + &totals.sgst + &totals.cgst);
    }
}

#[test]
fn test_amount_in_words_examples() {
    assert_eq!(amount_in_words(&BigDecimal::from(0)), "Zero Rupees Only");

    let lakh = amount_in_words(&BigDecimal::from(100000));
    assert!(lakh.contains("One Lakh"));
    assert!(lakh.ends_with("Rupees Only"));

    assert_eq!(
        amount_in_words(&dec("54850.50")),
        "Fifty Four Thousand Eight Hundred and Fifty Rupees and 50/100 Paise Only"
    );
    assert_eq!(
        amount_in_words(&dec("12345678")),
        "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred and Seventy Eight Rupees Only"
    );
}

#[test]
fn test_strict_validation_rejects_garbage() {
    let mut form = BillForm::new();
    form.update_line(0, |line| {
        *line = chain();
        line.weight_grams = Some(NumericInput::from("ten"));
    })
    .unwrap();

    let err = form
        .to_document_validated(&InvoiceCalculator::default(), &StrictLineItemValidator)
        .unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    // The permissive path coerces the weight to zero
    let document = form.to_document(&InvoiceCalculator::default());
    assert_eq!(document.lines[0].amount, dec("250"));
}

#[test]
fn test_custom_tax_rate_from_config() {
    let config = BillingConfig::from_json_str(r#"{ "taxRatePercent": 5, "invoicePrefix": "SJ" }"#)
        .unwrap();
    let calculator = InvoiceCalculator::from_config(&config).unwrap();

    let totals = calculator.compute_totals(&[chain().resolve()], &DiscountPolicy::none());
    assert_eq!(totals.sgst, dec("1371.25"));
    assert_eq!(totals.grand_total, dec("57592.50"));

    assert!(BillingConfig::from_json_str(r#"{ "taxRatePercent": 140 }"#).is_err());
}

#[test]
fn test_storefront_order_flow() {
    let storage = MemoryStore::new();
    let products = ProductStore::new(storage.clone());
    let orders = OrderStore::new(storage.clone());

    let necklace = products
        .add(NewProduct {
            id: Some("neck-01".to_string()),
            title: Some("Temple Necklace".to_string()),
            images: serde_json::from_str(r#""/img/n1.png, /img/n2.png""#).unwrap(),
            price: Some(NumericInput::from("₹1,18,000")),
            mrp: Some(NumericInput::from(125000.0)),
            ..NewProduct::default()
        })
        .unwrap();
    assert_eq!(necklace.image, "/img/n1.png");
    assert_eq!(necklace.images.len(), 2);

    let cart = vec![CartItem {
        id: necklace.id.clone(),
        title: necklace.title.clone(),
        image: necklace.image.clone(),
        price: Some(NumericInput::from(necklace.price.clone())),
        qty: Some(2),
    }];
    let order = orders
        .place_order(
            cart,
            Some("upi".to_string()),
            Some(DeliveryAddress {
                name: "Asha Verma".to_string(),
                line1: "12 Civil Lines".to_string(),
                city: "Gorakhpur".to_string(),
                pincode: "273001".to_string(),
                state: "Uttar Pradesh".to_string(),
                phone: "9876543210".to_string(),
                ..DeliveryAddress::default()
            }),
        )
        .unwrap();
    assert_eq!(order.total, dec("236000"));

    orders.mark_delivered(&order.id).unwrap();
    let stored = orders.get(&order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);

    // Both stores share one backing store, under separate keys
    assert_eq!(storage.len(), 2);
    let summary = orders.summary().unwrap();
    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.average_order_value, dec("236000"));
}

#[test]
fn test_browse_wishlist_cart_checkout() {
    let storage = MemoryStore::new();
    let products = ProductStore::new(storage.clone());
    let cart = CartStore::new(storage.clone());
    let wishlist = WishlistStore::new(storage.clone());
    let orders = OrderStore::new(storage.clone());

    for (id, title, material, price) in [
        ("b1", "Bestseller Gold Necklace", "Gold", "₹22,999"),
        ("b2", "Top Rated Ring", "Gold", "₹12,499"),
        ("b3", "Popular Earrings", "Silver", "₹3,999"),
    ] {
        products
            .add(NewProduct {
                id: Some(id.to_string()),
                title: Some(title.to_string()),
                material: Some(material.to_string()),
                price: Some(NumericInput::from(price)),
                ..NewProduct::default()
            })
            .unwrap();
    }

    let filter = ProductFilter {
        materials: vec!["Gold".to_string()],
        sort: SortOrder::PriceAsc,
        ..ProductFilter::default()
    };
    let gold = filter.apply(&products.list().unwrap());
    let ids: Vec<&str> = gold.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["b2", "b1"]);

    wishlist.add_product(&gold[1]).unwrap();
    cart.add_product(&gold[0]).unwrap();
    cart.increment("b2").unwrap();
    wishlist.move_to_cart("b1", &cart).unwrap();
    assert!(wishlist.items().unwrap().is_empty());

    let totals = cart.totals().unwrap();
    assert_eq!(totals.subtotal, dec("47997"));
    assert_eq!(totals.count, 3);

    let order = cart.checkout(&orders, None, None).unwrap();
    assert_eq!(order.total, dec("47997"));
    assert_eq!(order.item_count(), 3);
    assert!(cart.items().unwrap().is_empty());
}

#[test]
fn test_corrupt_store_data_falls_back_to_empty() {
    use jewellery_billing::KeyValueStore;

    let storage = MemoryStore::new();
    storage.write("orders", "not json".to_string()).unwrap();
    let orders = OrderStore::new(storage);
    assert!(orders.list().unwrap().is_empty());
}
