//! Product catalog module.

mod product;
mod store;

pub use product::Product;
pub use store::{paths, CatalogStore};
