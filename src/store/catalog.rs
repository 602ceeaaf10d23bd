//! Catalogue search, filtering and sorting

use std::cmp::Ordering;

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::store::products::Product;

/// Types offered when no product title yields one
pub const DEFAULT_PRODUCT_TYPES: [&str; 8] = [
    "Anklet",
    "Bracelets",
    "Charm",
    "Earrings",
    "GIFT BOX",
    "Jewelry Sets",
    "Necklace",
    "Rakhi",
];

/// Order of a filtered listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalogue order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Relevance => Ordering::Equal,
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortOrder::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        }
    }
}

/// Product type: the explicit type, else the first word of the title with
/// non-word characters dropped
pub fn derive_type(product: &Product) -> String {
    let explicit = product.product_type.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    product
        .title
        .split(' ')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Listing filter. Empty lists and absent bounds match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Case-insensitive title search
    pub q: String,
    /// Lowest price; zero when absent
    pub min: Option<BigDecimal>,
    pub max: Option<BigDecimal>,
    pub materials: Vec<String>,
    pub types: Vec<String>,
    /// Matched against the colour, or the material when no colour is set
    pub colors: Vec<String>,
    pub sort: SortOrder,
}

impl ProductFilter {
    /// Whether a product passes every criterion
    pub fn matches(&self, product: &Product) -> bool {
        let q = self.q.trim().to_lowercase();
        if !q.is_empty() && !product.title.to_lowercase().contains(&q) {
            return false;
        }
        if !self.materials.is_empty() && !self.materials.contains(&product.material) {
            return false;
        }
        if !self.types.is_empty() && !self.types.contains(&derive_type(product)) {
            return false;
        }
        if !self.colors.is_empty() {
            let color = if product.color.is_empty() {
                &product.material
            } else {
                &product.color
            };
            if color.is_empty() || !self.colors.contains(color) {
                return false;
            }
        }

        let min = self.min.clone().unwrap_or_else(|| BigDecimal::from(0));
        if product.price < min {
            return false;
        }
        match &self.max {
            Some(max) => product.price <= *max,
            None => true,
        }
    }

    /// Matching products in the requested order; ties keep catalogue order
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}

/// Choices a filter panel offers for a catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// At most zero
    pub price_min: BigDecimal,
    /// At least one lakh
    pub price_max: BigDecimal,
    pub types: Vec<String>,
    pub materials: Vec<String>,
}

impl FilterOptions {
    pub fn from_products(products: &[Product]) -> Self {
        let price_min = products
            .iter()
            .map(|p| p.price.clone())
            .fold(BigDecimal::from(0), |acc, price| acc.min(price))
            .with_scale_round(0, RoundingMode::Floor);
        let price_max = products
            .iter()
            .map(|p| p.price.clone())
            .fold(BigDecimal::from(100_000), |acc, price| acc.max(price))
            .with_scale_round(0, RoundingMode::Ceiling);

        let mut types = unique(products.iter().map(derive_type));
        if types.is_empty() {
            types = DEFAULT_PRODUCT_TYPES.iter().map(|t| t.to_string()).collect();
        }
        let materials = unique(products.iter().map(|p| p.material.clone()));

        Self {
            price_min,
            price_max,
            types,
            materials,
        }
    }
}

/// Non-empty values in first-seen order
fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
