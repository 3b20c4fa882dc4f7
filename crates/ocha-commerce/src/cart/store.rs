//! Persisted shopping cart.

use super::{CartLine, NewCartLine};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::CommerceError;
use ocha_cache::{keys, Cache};

/// The shopping cart of one application session.
///
/// Lines are kept in insertion order with at most one line per
/// `(product_id, size)`. Every mutation saves the full list to the cache
/// before returning.
#[derive(Debug)]
pub struct CartStore {
    cache: Cache,
    items: Vec<CartLine>,
}

impl CartStore {
    /// Create the store, restoring lines saved in the cache.
    ///
    /// Unreadable cache data yields an empty cart.
    pub fn new(cache: Cache) -> Self {
        let items = load_lines(&cache);
        Self { cache, items }
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, product_id: &ProductId, size: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.matches(product_id, size))
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price * quantity`.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Cart total in CHF, rounded to cents once after summing.
    pub fn total_money(&self) -> Money {
        Money::from_decimal_sum(self.items.iter().map(CartLine::line_total), Currency::CHF)
    }

    /// Add an item, merging with an existing line of the same product and size.
    ///
    /// An item without a product id is ignored. On merge the quantity is
    /// increased and the unit price replaced by the new one when given. New
    /// lines default to name "Product", size "M", price 0 and quantity 1.
    pub fn add_item(&mut self, item: NewCartLine) -> Result<(), CommerceError> {
        let Some(product_id) = item.valid_product_id().cloned() else {
            tracing::debug!("ignoring cart item without product id");
            return Ok(());
        };

        let size = item.effective_size().to_string();
        let quantity = item.effective_quantity();

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.matches(&product_id, &size))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            if let Some(price) = item.effective_price() {
                line.unit_price = price;
            }
            tracing::debug!(product = %product_id, %size, quantity = line.quantity, "merged cart line");
        } else {
            self.items.push(item.into_line(product_id.clone()));
            tracing::debug!(product = %product_id, %size, quantity, "added cart line");
        }

        self.save()
    }

    /// Delete the line for `(product_id, size)`; unknown keys are a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str) -> Result<(), CommerceError> {
        self.items.retain(|l| !l.matches(product_id, size));
        self.save()
    }

    /// Overwrite a line's quantity; zero or less removes it.
    ///
    /// Does nothing when no line matches.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let Some(index) = self.items.iter().position(|l| l.matches(product_id, size)) else {
            return Ok(());
        };

        if quantity <= 0 {
            return self.remove_item(product_id, size);
        }

        self.items[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.save()
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.items.clear();
        self.save()
    }

    fn save(&self) -> Result<(), CommerceError> {
        self.cache.set(keys::CART_ITEMS, &self.items)?;
        Ok(())
    }
}

fn load_lines(cache: &Cache) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = cache.load_or_default(keys::CART_ITEMS);
    let before = lines.len();
    lines.retain(CartLine::is_valid);
    if lines.len() < before {
        tracing::warn!(dropped = before - lines.len(), "dropped invalid cart lines");
    }
    lines
}
