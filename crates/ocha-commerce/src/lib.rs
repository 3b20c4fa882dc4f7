//! Storefront domain types and stores for the OCHA client.
//!
//! This crate provides the stateful parts of the ordering app:
//!
//! - **Cart**: persisted line items merged by product and size
//! - **Orders**: order submission, history, and the active order
//! - **Catalog**: the product listing
//!
//! # Example
//!
//! ```rust,ignore
//! use ocha_commerce::prelude::*;
//!
//! let mut cart = CartStore::new(cache.clone());
//! cart.add_item(NewCartLine::new("matcha-latte").size("L").unit_price(6.5))?;
//! cart.add_item(NewCartLine::new("matcha-latte").size("L").quantity(2))?;
//! assert_eq!(cart.total_quantity(), 3);
//!
//! let mut orders = OrderStore::new(client.clone());
//! let order = NewOrder::new("zurich-hb", pickup_time, cart.items().to_vec());
//! orders.create_order(&order).await?;
//! println!("{:?}", orders.active_order().map(|o| &o.status));
//! ```

mod de;

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod orders;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{CartLine, CartStore, NewCartLine};

    // Catalog
    pub use crate::catalog::{CatalogStore, Product};

    // Orders
    pub use crate::orders::{NewOrder, Order, OrderItem, OrderStatus, OrderStore};
}
