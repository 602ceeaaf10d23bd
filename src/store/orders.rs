//! Orders placed from the storefront checkout

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::analytics::{summarize, SalesSummary};
use crate::store::cart::{cart_totals, CartItem};
use crate::store::{generate_id, read_json, write_json};
use crate::traits::KeyValueStore;
use crate::types::*;
use crate::utils::money::{parse_money, NumericInput};

/// Storage key of the order list
pub const ORDERS_KEY: &str = "orders";

/// Payment method recorded when none is chosen (cash on delivery)
pub const DEFAULT_PAYMENT_METHOD: &str = "cod";

/// Fulfilment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Delivered,
}

/// Where an order ships
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryAddress {
    pub name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub pincode: String,
    pub state: String,
    pub phone: String,
}

/// One purchased product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub title: String,
    pub image: String,
    pub price: BigDecimal,
    pub qty: u32,
}

impl OrderItem {
    /// price × qty
    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.qty)
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
    pub payment_method: String,
    pub status: OrderStatus,
    pub address: Option<DeliveryAddress>,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Number of pieces in the order
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }
}

/// Input for creating an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<CartItem>,
    pub subtotal: Option<NumericInput>,
    pub total: Option<NumericInput>,
    pub payment_method: Option<String>,
    pub address: Option<DeliveryAddress>,
}

/// Partial update of an order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub delivered_at: Option<Option<DateTime<Utc>>>,
    pub payment_method: Option<String>,
    pub address: Option<Option<DeliveryAddress>>,
}

impl OrderPatch {
    fn apply(self, order: &mut Order) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(delivered_at) = self.delivered_at {
            order.delivered_at = delivered_at;
        }
        if let Some(payment_method) = self.payment_method {
            order.payment_method = payment_method;
        }
        if let Some(address) = self.address {
            order.address = address;
        }
    }
}

/// Order list kept under [`ORDERS_KEY`]
pub struct OrderStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> OrderStore<S> {
    /// Create an order store over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All orders, newest first
    pub fn list(&self) -> BillingResult<Vec<Order>> {
        read_json(&self.storage, ORDERS_KEY, Vec::new())
    }

    /// Get an order by ID
    pub fn get(&self, order_id: &str) -> BillingResult<Option<Order>> {
        Ok(self.list()?.into_iter().find(|o| o.id == order_id))
    }

    /// Record a new order with status `placed`
    pub fn create(&self, input: NewOrder) -> BillingResult<Order> {
        let now = Utc::now();
        let order = Order {
            id: generate_id("ord", now),
            items: input
                .items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.id.clone(),
                    title: item.title.clone(),
                    image: item.image.clone(),
                    price: item.unit_price(),
                    qty: item.quantity(),
                })
                .collect(),
            subtotal: parse_money(input.subtotal.as_ref()),
            total: parse_money(input.total.as_ref()),
            payment_method: input
                .payment_method
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            status: OrderStatus::Placed,
            address: input.address,
            created_at: now,
            delivered_at: None,
        };

        let mut orders = self.list()?;
        debug!(id = %order.id, total = %order.total, items = order.items.len(), "Creating order");
        orders.insert(0, order.clone());
        write_json(&self.storage, ORDERS_KEY, &orders)?;
        Ok(order)
    }

    /// Checkout: total the cart and record the order
    pub fn place_order(
        &self,
        cart: Vec<CartItem>,
        payment_method: Option<String>,
        address: Option<DeliveryAddress>,
    ) -> BillingResult<Order> {
        if cart.is_empty() {
            return Err(BillingError::Validation("Cart is empty".to_string()));
        }
        let totals = cart_totals(&cart);
        self.create(NewOrder {
            items: cart,
            subtotal: Some(NumericInput::from(totals.subtotal)),
            total: Some(NumericInput::from(totals.total)),
            payment_method,
            address,
        })
    }

    /// Apply a patch to an order
    pub fn update(&self, order_id: &str, patch: OrderPatch) -> BillingResult<Order> {
        let mut orders = self.list()?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| BillingError::OrderNotFound(order_id.to_string()))?;

        patch.apply(order);
        let updated = order.clone();

        debug!(id = %order_id, status = ?updated.status, "Updating order");
        write_json(&self.storage, ORDERS_KEY, &orders)?;
        Ok(updated)
    }

    /// Mark an order delivered now
    pub fn mark_delivered(&self, order_id: &str) -> BillingResult<Order> {
        self.update(
            order_id,
            OrderPatch {
                status: Some(OrderStatus::Delivered),
                delivered_at: Some(Some(Utc::now())),
                ..OrderPatch::default()
            },
        )
    }

    /// Sales summary over every stored order
    pub fn summary(&self) -> BillingResult<SalesSummary> {
        Ok(summarize(&self.list()?))
    }
}
