//! Product catalogue management

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{generate_id, read_json, write_json};
use crate::traits::KeyValueStore;
use crate::types::*;
use crate::utils::money::{parse_money, NumericInput};

/// Storage key of the product list
pub const PRODUCTS_KEY: &str = "products";

/// Image shown when a product has none
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// A catalogue product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    /// Primary image
    pub image: String,
    pub video: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub color: String,
    pub material: String,
    /// Printed maximum retail price
    pub mrp: BigDecimal,
    /// Selling price
    pub price: BigDecimal,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image list as entered: a list, or one comma-separated string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageList {
    Many(Vec<String>),
    Joined(String),
}

impl ImageList {
    /// Trimmed, non-empty image paths
    pub fn into_paths(self) -> Vec<String> {
        let paths: Vec<String> = match self {
            ImageList::Many(paths) => paths,
            ImageList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        paths
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Input for adding a product; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<ImageList>,
    pub image: Option<String>,
    pub video: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub mrp: Option<NumericInput>,
    pub price: Option<NumericInput>,
    pub available: Option<bool>,
}

/// Partial update of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub image: Option<String>,
    pub video: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub mrp: Option<NumericInput>,
    pub price: Option<NumericInput>,
    pub available: Option<bool>,
}

impl ProductPatch {
    fn apply(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(video) = self.video {
            product.video = video;
        }
        if let Some(product_type) = self.product_type {
            product.product_type = product_type;
        }
        if let Some(color) = self.color {
            product.color = color;
        }
        if let Some(material) = self.material {
            product.material = material;
        }
        if let Some(mrp) = self.mrp {
            product.mrp = parse_money(Some(&mrp));
        }
        if let Some(price) = self.price {
            product.price = parse_money(Some(&price));
        }
        if let Some(available) = self.available {
            product.available = available;
        }
    }
}

/// Product list kept under [`PRODUCTS_KEY`]
pub struct ProductStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> ProductStore<S> {
    /// Create a product store over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All products, newest first
    pub fn list(&self) -> BillingResult<Vec<Product>> {
        read_json(&self.storage, PRODUCTS_KEY, Vec::new())
    }

    /// Get a product by ID
    pub fn get(&self, product_id: &str) -> BillingResult<Option<Product>> {
        Ok(self.list()?.into_iter().find(|p| p.id == product_id))
    }

    /// Add a product at the front of the list.
    ///
    /// A blank or missing ID is generated; an ID already in use is rejected.
    pub fn add(&self, input: NewProduct) -> BillingResult<Product> {
        let mut products = self.list()?;
        let now = Utc::now();

        let id = input
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| generate_id("prod", now));

        if products.iter().any(|p| p.id == id) {
            return Err(BillingError::DuplicateProduct(id));
        }

        let images = input.images.map(ImageList::into_paths).unwrap_or_default();
        let image = input
            .image
            .filter(|i| !i.trim().is_empty())
            .or_else(|| images.first().cloned())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        let product = Product {
            id,
            title: input
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            description: input.description.unwrap_or_default(),
            images,
            image,
            video: input.video.unwrap_or_default(),
            product_type: input.product_type.unwrap_or_default(),
            color: input.color.unwrap_or_default(),
            material: input.material.unwrap_or_default(),
            mrp: parse_money(input.mrp.as_ref()),
            price: parse_money(input.price.as_ref()),
            available: input.available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, title = %product.title, "Adding product");
        products.insert(0, product.clone());
        write_json(&self.storage, PRODUCTS_KEY, &products)?;
        Ok(product)
    }

    /// Apply a patch and bump `updated_at`
    pub fn update(&self, product_id: &str, patch: ProductPatch) -> BillingResult<Product> {
        let mut products = self.list()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| BillingError::ProductNotFound(product_id.to_string()))?;

        patch.apply(product);
        product.updated_at = Utc::now();
        let updated = product.clone();

        debug!(id = %product_id, "Updating product");
        write_json(&self.storage, PRODUCTS_KEY, &products)?;
        Ok(updated)
    }

    /// Flip the availability flag
    pub fn toggle_availability(&self, product_id: &str) -> BillingResult<Product> {
        let product = self
            .get(product_id)?
            .ok_or_else(|| BillingError::ProductNotFound(product_id.to_string()))?;
        self.update(
            product_id,
            ProductPatch {
                available: Some(!product.available),
                ..ProductPatch::default()
            },
        )
    }

    /// Add `defaults` when the catalogue is empty.
    ///
    /// Returns the existing products when there are any, otherwise the
    /// seeded products in the order given.
    pub fn seed_if_empty(&self, defaults: Vec<NewProduct>) -> BillingResult<Vec<Product>> {
        let existing = self.list()?;
        if !existing.is_empty() {
            return Ok(existing);
        }
        defaults.into_iter().map(|d| self.add(d)).collect()
    }
}
