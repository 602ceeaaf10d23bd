//! Back office: catalogue, cart checkout and sales summary over an in-memory store

use jewellery_billing::store::{
    CartStore, DeliveryAddress, NewProduct, OrderStore, ProductFilter, ProductStore, SortOrder,
    WishlistStore,
};
use jewellery_billing::utils::MemoryStore;
use jewellery_billing::{format_rs, NumericInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("💍 Jewellery Billing - Back Office\n");

    let storage = MemoryStore::new();
    let products = ProductStore::new(storage.clone());
    let orders = OrderStore::new(storage.clone());
    let cart = CartStore::new(storage.clone());
    let wishlist = WishlistStore::new(storage);

    // 1. Seed the catalogue
    let catalogue = products.seed_if_empty(vec![
        NewProduct {
            title: Some("Temple Necklace".to_string()),
            material: Some("Gold".to_string()),
            price: Some(NumericInput::from("₹1,18,000")),
            mrp: Some(NumericInput::from("1,25,000")),
            ..NewProduct::default()
        },
        NewProduct {
            title: Some("Silver Toe Ring".to_string()),
            material: Some("Silver".to_string()),
            price: Some(NumericInput::from(349.5)),
            ..NewProduct::default()
        },
    ])?;

    println!("📦 Catalogue:");
    for product in &catalogue {
        println!(
            "  {} - {} ({}) {}",
            product.id,
            product.title,
            product.material,
            format_rs(&product.price)
        );
    }
    println!();

    // 2. Browse cheapest first, save one piece and check out the cart
    let listing = ProductFilter {
        sort: SortOrder::PriceAsc,
        ..ProductFilter::default()
    }
    .apply(&catalogue);
    for product in &listing {
        cart.add_product(product)?;
        cart.increment(&product.id)?;
    }
    if let Some(dearest) = listing.last() {
        wishlist.add_product(dearest)?;
    }
    println!("💖 Wishlist holds {} item(s)", wishlist.items()?.len());

    let order = cart.checkout(
        &orders,
        None,
        Some(DeliveryAddress {
            name: "Asha Verma".to_string(),
            line1: "12 Civil Lines".to_string(),
            city: "Gorakhpur".to_string(),
            pincode: "273001".to_string(),
            state: "Uttar Pradesh".to_string(),
            phone: "9876543210".to_string(),
            ..DeliveryAddress::default()
        }),
    )?;
    println!(
        "🛒 Placed {} with {} pieces, total {} ({})",
        order.id,
        order.item_count(),
        format_rs(&order.total),
        order.payment_method
    );

    let delivered = orders.mark_delivered(&order.id)?;
    println!("🚚 {} is now {:?}\n", delivered.id, delivered.status);

    // 3. Sales summary
    let summary = orders.summary()?;
    println!("📈 Sales:");
    println!("  Orders:          {}", summary.total_orders);
    println!("  Total sales:     {}", format_rs(&summary.total_sales));
    println!("  Average order:   {}", format_rs(&summary.average_order_value));
    for (month, total) in &summary.by_month {
        println!("  {month}: {}", format_rs(total));
    }

    Ok(())
}
