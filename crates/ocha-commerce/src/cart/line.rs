//! Cart line types.

use crate::de;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Size used when an item is added without one.
pub const DEFAULT_SIZE: &str = "M";

/// Name used when an item is added without one.
pub const DEFAULT_NAME: &str = "Product";

/// One product and size in the cart.
///
/// Serialized with camelCase field names; this is the persisted form and the
/// shape of each entry in an order's `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: String,
}

impl CartLine {
    /// Whether this line has the given identity key.
    pub fn matches(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product_id == product_id && self.size == size
    }

    /// `unit_price * quantity` as a plain number.
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.quantity > 0 && !self.product_id.is_blank()
    }
}

/// An item to add to the cart.
///
/// Every field but the product id is optional; see
/// [`CartStore::add_item`](super::CartStore::add_item) for the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCartLine {
    pub product_id: Option<ProductId>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity: Option<u32>,
    pub image_url: Option<String>,
}

impl NewCartLine {
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// The product id, unless missing or blank.
    pub(crate) fn valid_product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref().filter(|id| !id.is_blank())
    }

    /// The size after defaulting, used for the identity match.
    pub(crate) fn effective_size(&self) -> &str {
        self.size
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SIZE)
    }

    /// Requested quantity; zero or missing counts as one.
    pub(crate) fn effective_quantity(&self) -> u32 {
        self.quantity.filter(|q| *q > 0).unwrap_or(1)
    }

    pub(crate) fn effective_price(&self) -> Option<f64> {
        self.unit_price.filter(|p| p.is_finite())
    }

    pub(crate) fn into_line(self, product_id: ProductId) -> CartLine {
        let size = self.effective_size().to_string();
        let quantity = self.effective_quantity();
        let unit_price = self.effective_price().unwrap_or(0.0);
        CartLine {
            product_id,
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            size,
            unit_price,
            quantity,
            image_url: self.image_url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let line = NewCartLine::new("sencha").into_line(ProductId::new("sencha"));
        assert_eq!(line.name, DEFAULT_NAME);
        assert_eq!(line.size, DEFAULT_SIZE);
        assert_eq!(line.unit_price, 0.0);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.image_url, "");
    }

    #[test]
    fn test_zero_quantity_counts_as_one() {
        assert_eq!(NewCartLine::new("x").quantity(0).effective_quantity(), 1);
        assert_eq!(NewCartLine::new("x").quantity(4).effective_quantity(), 4);
    }

    #[test]
    fn test_blank_product_id_is_invalid() {
        assert!(NewCartLine::new("  ").valid_product_id().is_none());
        assert!(NewCartLine::default().valid_product_id().is_none());
    }

    #[test]
    fn test_serialized_form_is_camel_case() {
        let line = NewCartLine::new("hojicha")
            .name("Hojicha Latte")
            .size("L")
            .unit_price(6.5)
            .quantity(2)
            .image_url("/img/hojicha.png")
            .into_line(ProductId::new("hojicha"));

        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({
                "productId": "hojicha",
                "name": "Hojicha Latte",
                "size": "L",
                "unitPrice": 6.5,
                "quantity": 2,
                "imageUrl": "/img/hojicha.png"
            })
        );
    }

    #[test]
    fn test_line_totals() {
        let line = NewCartLine::new("a")
            .unit_price(4.35)
            .quantity(3)
            .into_line(ProductId::new("a"));
        assert!((line.line_total() - 13.05).abs() < 1e-9);
    }
}
