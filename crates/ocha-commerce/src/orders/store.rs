//! Order submission and order history.

use super::{NewOrder, Order, OrderItem};
use crate::de;
use crate::ids::OrderId;
use crate::CommerceError;
use ocha_data::ApiClient;
use serde_json::Value;

/// Backend endpoints used by the order store.
pub mod paths {
    use crate::ids::OrderId;

    pub const MY_ORDERS: &str = "/users/me/orders";
    pub const ORDERS: &str = "/orders";

    pub fn order_items(id: &OrderId) -> String {
        format!("/orders/{}/items", id)
    }
}

/// The signed-in user's orders.
#[derive(Debug)]
pub struct OrderStore {
    client: ApiClient,
    orders: Vec<Order>,
    loading: bool,
    error: Option<String>,
}

impl OrderStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            orders: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Orders from the last successful fetch, newest first as sent by the backend.
    pub fn my_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// First order that is neither picked up nor cancelled.
    pub fn active_order(&self) -> Option<&Order> {
        self.orders.iter().find(|o| o.is_active())
    }

    /// Replace the order list with the backend's.
    ///
    /// A success body without an `orders` array yields an empty list. On
    /// failure the list is cleared and the error recorded.
    pub async fn fetch_my_orders(&mut self) -> Result<&[Order], CommerceError> {
        self.loading = true;
        self.error = None;
        let result = self.client.get_json(paths::MY_ORDERS).await;
        self.loading = false;

        match result {
            Ok(body) => {
                self.orders = de::elements(body.get("orders"), "order");
                tracing::debug!(count = self.orders.len(), "fetched orders");
                Ok(&self.orders)
            }
            Err(e) => {
                let err = CommerceError::from(e);
                self.orders.clear();
                self.record(&err, "failed to fetch orders");
                Err(err)
            }
        }
    }

    /// Line items of one order; empty when the body has no `items` array.
    pub async fn fetch_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, CommerceError> {
        let body = self.client.get_json(&paths::order_items(order_id)).await?;
        Ok(de::elements(body.get("items"), "order item"))
    }

    /// Submit an order and refresh the order list.
    ///
    /// Returns the backend's response body. A failed refresh is recorded in
    /// [`error`](Self::error) and returned as
    /// [`CommerceError::RefreshAfterOrder`], which still carries that body
    /// since the backend has accepted the order.
    pub async fn create_order(&mut self, order: &NewOrder) -> Result<Value, CommerceError> {
        self.loading = true;
        self.error = None;
        let result = self.submit(order).await;
        self.loading = false;

        let created = match result {
            Ok(created) => created,
            Err(err) => {
                self.record(&err, "failed to create order");
                return Err(err);
            }
        };

        tracing::info!(
            store = %order.store_id,
            lines = order.items.len(),
            "order placed"
        );

        if let Err(e) = self.fetch_my_orders().await {
            return Err(CommerceError::RefreshAfterOrder {
                created,
                source: Box::new(e),
            });
        }
        Ok(created)
    }

    async fn submit(&self, order: &NewOrder) -> Result<Value, CommerceError> {
        Ok(self.client.post_json(paths::ORDERS, &order.payload()).await?)
    }

    fn record(&mut self, err: &CommerceError, context: &str) {
        tracing::warn!(error = %err, "{}", context);
        self.error = Some(err.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLine, NewCartLine};
    use crate::ids::ProductId;
    use chrono::{TimeZone, Utc};
    use ocha_cache::Cache;
    use ocha_data::{ApiConfig, CachedCredential, FetchError, Method, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://mock/api/v1";

    fn setup() -> (Arc<MockTransport>, OrderStore) {
        let mock = Arc::new(MockTransport::new(BASE));
        let client = ApiClient::new(
            &ApiConfig::new(BASE).unwrap(),
            mock.clone(),
            Arc::new(CachedCredential::new(Cache::in_memory())),
        );
        (mock, OrderStore::new(client))
    }

    fn line(id: &str, price: f64, qty: u32) -> CartLine {
        NewCartLine::new(id)
            .unit_price(price)
            .quantity(qty)
            .into_line(ProductId::new(id))
    }

    fn new_order() -> NewOrder {
        NewOrder::new(
            "zurich-hb",
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
            vec![line("sencha", 5.0, 2), line("mochi", 3.0, 1)],
        )
    }

    fn statuses(store: &OrderStore) -> Vec<&str> {
        store.my_orders().iter().map(|o| o.status.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_my_orders() {
        let (mock, mut store) = setup();
        mock.respond_json(
            Method::Get,
            paths::MY_ORDERS,
            200,
            json!({"orders": [{"id": 1, "status": "ready"}, {"id": 2, "status": "picked_up"}]}),
        );

        let orders = store.fetch_my_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(statuses(&store), vec!["ready", "picked_up"]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_empty_not_error() {
        let (mock, mut store) = setup();
        mock.respond_json(Method::Get, paths::MY_ORDERS, 200, json!({"data": []}))
            .respond_json(Method::Get, paths::MY_ORDERS, 200, json!({"orders": "none"}))
            .respond_raw(Method::Get, paths::MY_ORDERS, 200, "<html>");

        for _ in 0..3 {
            assert!(store.fetch_my_orders().await.unwrap().is_empty());
            assert_eq!(store.error(), None);
        }
    }

    #[tokio::test]
    async fn test_unreadable_orders_are_skipped() {
        let (mock, mut store) = setup();
        mock.respond_json(
            Method::Get,
            paths::MY_ORDERS,
            200,
            json!({"orders": [{"id": 1}, 42, {"id": {"nested": true}}, {"id": 3}]}),
        );

        let ids: Vec<String> = store
            .fetch_my_orders()
            .await
            .unwrap()
            .iter()
            .filter_map(|o| o.id.as_ref().map(|id| id.to_string()))
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_and_records() {
        let (mock, mut store) = setup();
        mock.respond_json(Method::Get, paths::MY_ORDERS, 200, json!({"orders": [{"id": 1}]}))
            .respond_json(Method::Get, paths::MY_ORDERS, 401, json!({"message": "Token expired"}));

        store.fetch_my_orders().await.unwrap();
        let err = store.fetch_my_orders().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(store.my_orders().is_empty());
        assert_eq!(store.error(), Some("Token expired"));
    }

    #[tokio::test]
    async fn test_active_order() {
        let (mock, mut store) = setup();
        mock.respond_json(
            Method::Get,
            paths::MY_ORDERS,
            200,
            json!({"orders": [
                {"id": 1, "status": "picked_up"},
                {"id": 2, "status": "cancelled"}
            ]}),
        )
        .respond_json(
            Method::Get,
            paths::MY_ORDERS,
            200,
            json!({"orders": [
                {"id": 1, "status": "picked_up"},
                {"id": 2, "status": "preparing"},
                {"id": 3, "status": "pending"}
            ]}),
        );

        assert!(store.active_order().is_none());

        store.fetch_my_orders().await.unwrap();
        assert!(store.active_order().is_none());

        store.fetch_my_orders().await.unwrap();
        let active = store.active_order().unwrap();
        assert_eq!(active.id, Some(OrderId::new("2")));
    }

    #[tokio::test]
    async fn test_fetch_order_items() {
        let (mock, store) = setup();
        let id = OrderId::new("7");
        mock.respond_json(
            Method::Get,
            &paths::order_items(&id),
            200,
            json!({"items": [{"productId": "sencha", "quantity": 2, "unitPrice": 5}]}),
        )
        .respond_json(Method::Get, &paths::order_items(&id), 200, json!({"items": null}));

        let items = store.fetch_order_items(&id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].line_total(), 10.0);

        assert!(store.fetch_order_items(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_order_posts_total_and_refreshes() {
        let (mock, mut store) = setup();
        mock.respond_json(Method::Post, paths::ORDERS, 201, json!({"id": 9, "status": "pending"}));
        mock.respond_json(
            Method::Get,
            paths::MY_ORDERS,
            200,
            json!({"orders": [{"id": 9, "status": "pending"}]}),
        );

        let created = store.create_order(&new_order()).await.unwrap();

        assert_eq!(created["id"], json!(9));
        let body = mock.requests_to(Method::Post, paths::ORDERS)[0]
            .json_body()
            .unwrap();
        assert_eq!(body["totalAmountCHF"], json!(13.0));
        assert_eq!(body["storeId"], json!("zurich-hb"));
        assert_eq!(body["items"].as_array().unwrap().len(), 2);

        assert_eq!(store.my_orders().len(), 1);
        assert_eq!(store.active_order().unwrap().id, Some(OrderId::new("9")));
    }

    #[tokio::test]
    async fn test_create_order_failure_records_error() {
        let (mock, mut store) = setup();
        mock.respond_json(
            Method::Post,
            paths::ORDERS,
            422,
            json!({"message": "Store closed at that time"}),
        );

        let err = store.create_order(&new_order()).await.unwrap_err();

        assert!(matches!(err, CommerceError::Fetch(FetchError::HttpError { status: 422, .. })));
        assert_eq!(store.error(), Some("Store closed at that time"));
        assert!(mock.requests_to(Method::Get, paths::MY_ORDERS).is_empty());
    }

    #[tokio::test]
    async fn test_create_order_reports_failed_refresh() {
        let (mock, mut store) = setup();
        mock.respond_json(Method::Post, paths::ORDERS, 201, json!({"id": 9}));
        mock.respond_json(
            Method::Get,
            paths::MY_ORDERS,
            503,
            json!({"message": "Orders are unavailable"}),
        );

        let err = store.create_order(&new_order()).await.unwrap_err();

        match &err {
            CommerceError::RefreshAfterOrder { created, source } => {
                assert_eq!(created["id"], json!(9));
                assert!(matches!(**source, CommerceError::Fetch(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.user_message(), "Orders are unavailable");
        assert_eq!(store.error(), Some("Orders are unavailable"));
        assert!(store.my_orders().is_empty());
        assert!(!store.is_loading());
    }
}
