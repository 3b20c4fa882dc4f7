//! Product type.

use crate::cart::NewCartLine;
use crate::de;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    /// Price in CHF.
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub price: f64,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub image_url: Option<String>,
    /// Sizes offered; empty means a single default size.
    #[serde(default, deserialize_with = "de::lenient_vec")]
    pub sizes: Vec<String>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const PRODUCT_KEYS: de::KeyGroups = &[
    &["id", "_id", "productId", "product_id"],
    &["price", "unitPrice", "unit_price"],
    &["imageUrl", "image_url", "image"],
];

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::canonical(d, PRODUCT_KEYS, |v| Product::deserialize(v))
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        Product::serialize(self, s)
    }
}

impl Product {
    /// Price rounded to cents.
    pub fn price_money(&self) -> Money {
        Money::from_decimal(self.price, Currency::CHF)
    }

    /// Whether `size` can be ordered. Products without a size list accept any.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s == size)
    }

    /// Build a cart item for this product at its current price.
    pub fn to_cart_line(&self, size: Option<&str>, quantity: u32) -> NewCartLine {
        let mut line = NewCartLine::new(self.id.clone())
            .name(self.name.clone())
            .unit_price(self.price)
            .quantity(quantity);
        if let Some(size) = size {
            line = line.size(size);
        }
        if let Some(url) = &self.image_url {
            line = line.image_url(url.clone());
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matcha() -> Product {
        serde_json::from_value(json!({
            "id": 3,
            "name": "Matcha Latte",
            "price": "6.50",
            "imageUrl": "/img/matcha.png",
            "sizes": ["S", "M", "L"],
            "category": "latte"
        }))
        .unwrap()
    }

    #[test]
    fn test_lenient_product() {
        let p = matcha();
        assert_eq!(p.id, ProductId::new("3"));
        assert_eq!(p.price_money().amount_cents, 650);
        assert_eq!(p.extra.get("category"), Some(&json!("latte")));
    }

    #[test]
    fn test_offers_size() {
        let p = matcha();
        assert!(p.offers_size("L"));
        assert!(!p.offers_size("XL"));

        let one_size: Product = serde_json::from_value(json!({"id": "mochi"})).unwrap();
        assert!(one_size.offers_size("anything"));
    }

    #[test]
    fn test_to_cart_line() {
        let line = matcha().to_cart_line(Some("L"), 2);
        assert_eq!(line.product_id, Some(ProductId::new("3")));
        assert_eq!(line.size.as_deref(), Some("L"));
        assert_eq!(line.unit_price, Some(6.5));
        assert_eq!(line.quantity, Some(2));
        assert_eq!(line.image_url.as_deref(), Some("/img/matcha.png"));

        assert_eq!(matcha().to_cart_line(None, 1).size, None);
    }

    #[test]
    fn test_second_id_spelling_lands_in_extra() {
        let p: Product = serde_json::from_value(json!({
            "_id": "65a", "id": "65a", "unit_price": 4, "image": "/img/a.png"
        }))
        .unwrap();
        assert_eq!(p.id, ProductId::new("65a"));
        assert_eq!(p.price, 4.0);
        assert_eq!(p.image_url.as_deref(), Some("/img/a.png"));
        assert_eq!(p.extra.get("_id"), Some(&json!("65a")));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_value::<Product>(json!({"name": "Nameless"})).is_err());
    }
}
