//! # OCHA Storefront SDK
//!
//! Client-side state for the OCHA tea-shop ordering app: the signed-in
//! session, the cart, order history and the product catalog, all persisted
//! locally and synchronized with the REST backend.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ocha_sdk::prelude::*;
//!
//! let config = AppConfig::load(None)?;
//! let mut shop = Storefront::open(&config)?;
//!
//! shop.session_mut().login("aiko@example.ch", "secret").await?;
//!
//! shop.catalog_mut().fetch_products().await?;
//! let line = shop.catalog().products()[0].to_cart_line(Some("L"), 2);
//! shop.cart_mut().add_item(line)?;
//!
//! let order = shop.checkout("zurich-hb", pickup_time).await?;
//! println!("active: {:?}", shop.orders().active_order());
//! ```
//!
//! ## Architecture
//!
//! - [`ocha_cache`]: JSON key-value persistence (`auth_token`, `cart_items`)
//! - [`ocha_data`]: HTTP client adapter with bearer credential injection
//! - [`ocha_auth`]: session store
//! - [`ocha_commerce`]: cart, order and catalog stores
//!
//! [`Storefront`] wires one of each together around a shared cache and client.

mod config;
mod error;
mod storefront;

pub mod prelude;

// Re-export component crates
pub use ocha_auth;
pub use ocha_cache;
pub use ocha_commerce;
pub use ocha_data;

pub use config::{default_data_dir, AppConfig, StorageConfig, DATA_DIR_ENV};
pub use error::{ConfigError, SdkError};
pub use storefront::Storefront;
