//! Shopping cart module.
//!
//! Contains the cart line types and the persisted cart store.

mod line;
mod store;

pub use line::{CartLine, NewCartLine, DEFAULT_NAME, DEFAULT_SIZE};
pub use store::CartStore;
