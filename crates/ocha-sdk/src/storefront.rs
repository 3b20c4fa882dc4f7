//! The storefront context: one of each store, wired to a shared cache and client.

use crate::{AppConfig, SdkError};
use chrono::{DateTime, Utc};
use ocha_auth::SessionStore;
use ocha_cache::Cache;
use ocha_commerce::cart::CartStore;
use ocha_commerce::catalog::CatalogStore;
use ocha_commerce::ids::StoreId;
use ocha_commerce::CommerceError;
use ocha_commerce::orders::{NewOrder, OrderStore};
use ocha_data::{ApiClient, ApiConfig, CachedCredential, ReqwestTransport, Transport};
use serde_json::Value;
use std::sync::Arc;

/// Application state for one user session.
///
/// Constructed once and passed by reference to whatever drives the UI. All
/// stores share one [`Cache`] and one [`ApiClient`]; the client reads the
/// session credential from the cache on every request.
#[derive(Debug)]
pub struct Storefront {
    cache: Cache,
    client: ApiClient,
    session: SessionStore,
    cart: CartStore,
    orders: OrderStore,
    catalog: CatalogStore,
}

impl Storefront {
    /// Open the storefront with on-disk persistence and a real HTTP transport.
    pub fn open(config: &AppConfig) -> Result<Self, SdkError> {
        config.validate()?;
        let cache = Cache::open(&config.storage.data_dir)?;
        let transport = Arc::new(ReqwestTransport::new()?);
        tracing::info!(
            api = %config.api.base_url,
            data_dir = %config.storage.data_dir.display(),
            "storefront opened"
        );
        Ok(Self::from_parts(cache, transport, &config.api))
    }

    /// Assemble the storefront from an existing cache and transport.
    pub fn from_parts(cache: Cache, transport: Arc<dyn Transport>, api: &ApiConfig) -> Self {
        let credentials = Arc::new(CachedCredential::new(cache.clone()));
        let client = ApiClient::new(api, transport, credentials);
        Self {
            session: SessionStore::new(client.clone(), cache.clone()),
            cart: CartStore::new(cache.clone()),
            orders: OrderStore::new(client.clone()),
            catalog: CatalogStore::new(client.clone()),
            cache,
            client,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn orders_mut(&mut self) -> &mut OrderStore {
        &mut self.orders
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    /// Place the cart as an order for pickup at `store_id`.
    ///
    /// Requires a signed-in session and a non-empty cart. The cart is cleared
    /// only after the backend accepted the order.
    ///
    /// Once the backend has accepted the order this returns its response body
    /// even if reloading the order list or clearing the cart fails; both are
    /// logged, and the former is left in [`OrderStore::error`].
    pub async fn checkout(
        &mut self,
        store_id: impl Into<StoreId>,
        pickup_time: DateTime<Utc>,
    ) -> Result<Value, SdkError> {
        self.session.require_authenticated()?;
        if self.cart.is_empty() {
            return Err(SdkError::EmptyCart);
        }

        let order = NewOrder::new(store_id, pickup_time, self.cart.items().to_vec());
        let created = match self.orders.create_order(&order).await {
            Ok(created) => created,
            Err(CommerceError::RefreshAfterOrder { created, source }) => {
                tracing::warn!(error = %source, "order placed but the order list is stale");
                created
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = self.cart.clear() {
            tracing::warn!(error = %e, "order placed but the cart could not be cleared");
        }
        Ok(created)
    }
}
