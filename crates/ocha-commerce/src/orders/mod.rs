//! Orders module.
//!
//! Read models for placed orders, the order submission type, and the store
//! holding the signed-in user's order history.

mod order;
mod store;

pub use order::{NewOrder, Order, OrderItem, OrderStatus};
pub use store::{paths, OrderStore};
