//! Product, cart, wishlist and order stores over a [`KeyValueStore`], plus
//! catalogue filtering and sales analytics
//!
//! Each store keeps one JSON array under a fixed key and rewrites the whole
//! array on every change, newest entries first.

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod products;

pub use analytics::*;
pub use cart::*;
pub use catalog::*;
pub use orders::*;
pub use products::*;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::traits::KeyValueStore;
use crate::types::BillingResult;

/// Read and decode a JSON value, returning `fallback` when the key is absent
/// or holds data that no longer decodes
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    fallback: T,
) -> BillingResult<T> {
    let Some(raw) = store.read(key)? else {
        return Ok(fallback);
    };
    if raw.is_empty() {
        return Ok(fallback);
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Stored value is unreadable, using fallback");
            Ok(fallback)
        }
    }
}

/// Encode a value as JSON and store it
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> BillingResult<()> {
    let raw = serde_json::to_string(value)?;
    store.write(key, raw)
}

/// Identifier of the form `{prefix}_{base36 millis}_{6 random chars}`
pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}_{}_{}",
        to_base36(now.timestamp_millis().unsigned_abs()),
        &random[..6]
    )
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
