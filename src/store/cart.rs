//! Shopping cart and wishlist kept under the `cart` and `wishlist` keys
//!
//! Entries written by older clients may miss fields or carry numeric IDs, so
//! every read normalizes what it finds before handing it out.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::orders::{DeliveryAddress, Order, OrderStore};
use crate::store::products::{Product, PLACEHOLDER_IMAGE};
use crate::store::{read_json, write_json};
use crate::traits::KeyValueStore;
use crate::types::*;
use crate::utils::money::{parse_money, parse_quantity, round2, NumericInput};

/// Storage key of the cart
pub const CART_KEY: &str = "cart";

/// Storage key of the wishlist
pub const WISHLIST_KEY: &str = "wishlist";

/// A cart entry as the storefront keeps it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: Option<NumericInput>,
    pub qty: Option<i64>,
}

impl CartItem {
    /// One piece of a catalogue product
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            image: product.image.clone(),
            price: Some(NumericInput::from(product.price.clone())),
            qty: Some(1),
        }
    }

    /// Quantity, at least one
    pub fn quantity(&self) -> u32 {
        let qty = self.qty.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        u32::try_from(qty).unwrap_or(1)
    }

    /// Unit price through money parsing
    pub fn unit_price(&self) -> BigDecimal {
        parse_money(self.price.as_ref())
    }
}

/// Checkout summary of a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: BigDecimal,
    pub shipping: BigDecimal,
    pub total: BigDecimal,
    /// Number of pieces across all lines
    pub count: u32,
}

/// Sum a cart. Shipping is free.
pub fn cart_totals(items: &[CartItem]) -> CartTotals {
    let subtotal = round2(
        &items
            .iter()
            .map(|item| item.unit_price() * BigDecimal::from(item.quantity()))
            .sum::<BigDecimal>(),
    );
    let shipping = round2(&BigDecimal::from(0));
    let total = round2(&(&subtotal + &shipping));
    let count = items.iter().map(CartItem::quantity).sum();

    CartTotals {
        subtotal,
        shipping,
        total,
        count,
    }
}

/// A saved product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub title: String,
    pub image: String,
    pub price: BigDecimal,
}

impl WishlistItem {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price.clone(),
        }
    }
}

/// Cart or wishlist entry in whatever shape it was stored
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredEntry {
    id: Option<serde_json::Value>,
    title: Option<String>,
    image: Option<String>,
    center_image: Option<String>,
    img: Option<String>,
    price: Option<NumericInput>,
    amount: Option<NumericInput>,
    qty: Option<NumericInput>,
}

impl StoredEntry {
    fn id(&self) -> String {
        match &self.id {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => format!(
                "{}-{}",
                self.title.as_deref().unwrap_or_default(),
                self.image.as_deref().unwrap_or_default()
            ),
        }
    }

    fn image(&self) -> String {
        [&self.image, &self.center_image, &self.img]
            .into_iter()
            .flatten()
            .find(|path| !path.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }

    fn price(&self) -> BigDecimal {
        parse_money(self.price.as_ref().or(self.amount.as_ref()))
    }

    fn qty(&self) -> i64 {
        if self.qty.is_none() {
            return 1;
        }
        parse_quantity(self.qty.as_ref())
            .with_scale_round(0, RoundingMode::Down)
            .to_i64()
            .unwrap_or(1)
            .max(1)
    }

    fn into_cart_item(self) -> CartItem {
        CartItem {
            id: self.id(),
            image: self.image(),
            price: Some(NumericInput::from(self.price())),
            qty: Some(self.qty()),
            title: self.title.unwrap_or_else(|| "Item".to_string()),
        }
    }

    fn into_wishlist_item(self) -> WishlistItem {
        WishlistItem {
            id: self.id(),
            image: self.image(),
            price: self.price(),
            title: self.title.unwrap_or_else(|| "Item".to_string()),
        }
    }
}

/// Cart kept under [`CART_KEY`]
pub struct CartStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart store over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Normalized cart entries in insertion order
    pub fn items(&self) -> BillingResult<Vec<CartItem>> {
        let stored: Vec<StoredEntry> = read_json(&self.storage, CART_KEY, Vec::new())?;
        Ok(stored.into_iter().map(StoredEntry::into_cart_item).collect())
    }

    fn save(&self, items: &[CartItem]) -> BillingResult<()> {
        write_json(&self.storage, CART_KEY, items)
    }

    /// Add an entry, merging quantities when the product is already in the cart
    pub fn add(&self, item: CartItem) -> BillingResult<Vec<CartItem>> {
        let mut items = self.items()?;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                let qty = i64::from(existing.quantity()) + i64::from(item.quantity());
                existing.qty = Some(qty);
            }
            None => items.push(CartItem {
                qty: Some(i64::from(item.quantity())),
                ..item
            }),
        }
        debug!(items = items.len(), "Saving cart");
        self.save(&items)?;
        Ok(items)
    }

    /// Add one piece of a catalogue product
    pub fn add_product(&self, product: &Product) -> BillingResult<Vec<CartItem>> {
        self.add(CartItem::from_product(product))
    }

    fn change_quantity(&self, item_id: &str, delta: i64) -> BillingResult<Vec<CartItem>> {
        let mut items = self.items()?;
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| BillingError::ItemNotFound(item_id.to_string()))?;
        item.qty = Some((i64::from(item.quantity()) + delta).max(1));
        self.save(&items)?;
        Ok(items)
    }

    /// One more piece
    pub fn increment(&self, item_id: &str) -> BillingResult<Vec<CartItem>> {
        self.change_quantity(item_id, 1)
    }

    /// One piece fewer, never below one
    pub fn decrement(&self, item_id: &str) -> BillingResult<Vec<CartItem>> {
        self.change_quantity(item_id, -1)
    }

    /// Drop an entry; unknown IDs are ignored
    pub fn remove(&self, item_id: &str) -> BillingResult<Vec<CartItem>> {
        let mut items = self.items()?;
        items.retain(|item| item.id != item_id);
        self.save(&items)?;
        Ok(items)
    }

    /// Empty the cart
    pub fn clear(&self) -> BillingResult<()> {
        self.save(&[])
    }

    /// Totals of the current cart
    pub fn totals(&self) -> BillingResult<CartTotals> {
        Ok(cart_totals(&self.items()?))
    }

    /// Place an order for the whole cart, then forget the cart
    pub fn checkout<O: KeyValueStore>(
        &self,
        orders: &OrderStore<O>,
        payment_method: Option<String>,
        address: Option<DeliveryAddress>,
    ) -> BillingResult<Order> {
        let order = orders.place_order(self.items()?, payment_method, address)?;
        self.storage.remove(CART_KEY)?;
        Ok(order)
    }
}

/// Wishlist kept under [`WISHLIST_KEY`]
pub struct WishlistStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> WishlistStore<S> {
    /// Create a wishlist store over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Normalized saved items
    pub fn items(&self) -> BillingResult<Vec<WishlistItem>> {
        let stored: Vec<StoredEntry> = read_json(&self.storage, WISHLIST_KEY, Vec::new())?;
        Ok(stored.into_iter().map(StoredEntry::into_wishlist_item).collect())
    }

    fn save(&self, items: &[WishlistItem]) -> BillingResult<()> {
        write_json(&self.storage, WISHLIST_KEY, items)
    }

    /// Save an item; saving it twice keeps one entry
    pub fn add(&self, item: WishlistItem) -> BillingResult<Vec<WishlistItem>> {
        let mut items = self.items()?;
        if !items.iter().any(|existing| existing.id == item.id) {
            items.push(item);
            self.save(&items)?;
        }
        Ok(items)
    }

    /// Save a catalogue product
    pub fn add_product(&self, product: &Product) -> BillingResult<Vec<WishlistItem>> {
        self.add(WishlistItem::from_product(product))
    }

    /// Whether an item is saved
    pub fn contains(&self, item_id: &str) -> BillingResult<bool> {
        Ok(self.items()?.iter().any(|item| item.id == item_id))
    }

    /// Drop an entry; unknown IDs are ignored
    pub fn remove(&self, item_id: &str) -> BillingResult<Vec<WishlistItem>> {
        let mut items = self.items()?;
        items.retain(|item| item.id != item_id);
        self.save(&items)?;
        Ok(items)
    }

    /// Empty the wishlist
    pub fn clear(&self) -> BillingResult<()> {
        self.save(&[])
    }

    /// Move a saved item into `cart`, adding a piece when it is already there
    pub fn move_to_cart<C: KeyValueStore>(
        &self,
        item_id: &str,
        cart: &CartStore<C>,
    ) -> BillingResult<Vec<CartItem>> {
        let item = self
            .items()?
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| BillingError::ItemNotFound(item_id.to_string()))?;

        let cart_items = cart.add(CartItem {
            id: item.id.clone(),
            title: item.title.clone(),
            image: item.image.clone(),
            price: Some(NumericInput::from(item.price.clone())),
            qty: Some(1),
        })?;
        self.remove(&item.id)?;
        debug!(id = %item_id, "Moved wishlist item to cart");
        Ok(cart_items)
    }
}
