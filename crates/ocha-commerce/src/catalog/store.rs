//! Product listing.

use super::Product;
use crate::de;
use crate::ids::ProductId;
use crate::CommerceError;
use ocha_data::ApiClient;
use serde_json::Value;

/// Backend endpoints used by the catalog store.
pub mod paths {
    pub const PRODUCTS: &str = "/products";
}

/// Products offered by the shop.
#[derive(Debug)]
pub struct CatalogStore {
    client: ApiClient,
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
}

impl CatalogStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the product list.
    ///
    /// Accepts `{items: [...]}`, `{products: [...]}` or a bare array.
    pub async fn fetch_products(&mut self) -> Result<&[Product], CommerceError> {
        self.loading = true;
        self.error = None;
        let result = self.client.get_json(paths::PRODUCTS).await;
        self.loading = false;

        match result {
            Ok(body) => {
                self.products = de::elements(product_list(&body), "product");
                tracing::debug!(count = self.products.len(), "fetched products");
                Ok(&self.products)
            }
            Err(e) => {
                let err = CommerceError::from(e);
                tracing::warn!(error = %err, "failed to fetch products");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}

fn product_list(body: &Value) -> Option<&Value> {
    if body.is_array() {
        return Some(body);
    }
    body.get("items").or_else(|| body.get("products"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocha_data::{ApiConfig, Anonymous, Method, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://mock/api/v1";

    fn setup() -> (Arc<MockTransport>, CatalogStore) {
        let mock = Arc::new(MockTransport::new(BASE));
        let client = ApiClient::new(&ApiConfig::new(BASE).unwrap(), mock.clone(), Arc::new(Anonymous));
        (mock, CatalogStore::new(client))
    }

    #[tokio::test]
    async fn test_accepts_all_list_shapes() {
        let (mock, mut store) = setup();
        let product = json!({"id": "sencha", "name": "Sencha", "price": 5});
        mock.respond_json(Method::Get, paths::PRODUCTS, 200, json!({"items": [product.clone()]}))
            .respond_json(Method::Get, paths::PRODUCTS, 200, json!({"products": [product.clone()]}))
            .respond_json(Method::Get, paths::PRODUCTS, 200, json!([product]));

        for _ in 0..3 {
            assert_eq!(store.fetch_products().await.unwrap().len(), 1);
        }
        assert_eq!(store.product(&ProductId::new("sencha")).unwrap().price, 5.0);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_empty() {
        let (mock, mut store) = setup();
        mock.respond_json(Method::Get, paths::PRODUCTS, 200, json!({"total": 0}));
        assert!(store.fetch_products().await.unwrap().is_empty());
        assert!(store.product(&ProductId::new("sencha")).is_none());
    }

    #[tokio::test]
    async fn test_failure_records_error_and_keeps_list() {
        let (mock, mut store) = setup();
        mock.respond_json(Method::Get, paths::PRODUCTS, 200, json!([{"id": 1}]))
            .fail(Method::Get, paths::PRODUCTS, "offline");

        store.fetch_products().await.unwrap();
        assert!(store.fetch_products().await.is_err());
        assert!(store.error().is_some());
        assert_eq!(store.products().len(), 1);
    }
}
