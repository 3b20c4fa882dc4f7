//! Order types.

use crate::cart::CartLine;
use crate::de;
use crate::ids::{OrderId, ProductId, StoreId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Order status as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Accepted by the shop.
    Confirmed,
    /// Being prepared.
    Preparing,
    /// Ready for pickup.
    Ready,
    /// Collected by the customer.
    PickedUp,
    /// Order cancelled.
    Cancelled,
    /// Any status this client does not know.
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready for pickup",
            OrderStatus::PickedUp => "Picked up",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::PickedUp | OrderStatus::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "picked_up" => OrderStatus::PickedUp,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        OrderStatus::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order as listed by the backend.
///
/// Field names are accepted in camelCase or snake_case. Fields this client
/// does not model, including a second spelling of a modelled one, are kept in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub pickup_time: Option<String>,
    #[serde(default, rename = "totalAmountCHF", deserialize_with = "de::opt_f64")]
    pub total_amount_chf: Option<f64>,
    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "de::lenient_vec")]
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const ORDER_KEYS: de::KeyGroups = &[
    &["id", "_id", "order_id", "orderId"],
    &["storeId", "store_id"],
    &["pickupTime", "pickup_time"],
    &["totalAmountCHF", "total_amount_chf", "totalAmount", "total_amount"],
];

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::canonical(d, ORDER_KEYS, |v| Order::deserialize(v))
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        Order::serialize(self, s)
    }
}

impl Order {
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Total in CHF, rounded to cents.
    pub fn total(&self) -> Option<Money> {
        self.total_amount_chf
            .map(|t| Money::from_decimal(t, Currency::CHF))
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub size: String,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub unit_price: Option<f64>,
    #[serde(default = "de::one", deserialize_with = "de::count_or_one")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub image_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const ORDER_ITEM_KEYS: de::KeyGroups = &[
    &["productId", "product_id"],
    &["unitPrice", "unit_price"],
    &["imageUrl", "image_url"],
];

impl<'de> Deserialize<'de> for OrderItem {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        de::canonical(d, ORDER_ITEM_KEYS, |v| OrderItem::deserialize(v))
    }
}

impl Serialize for OrderItem {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        OrderItem::serialize(self, s)
    }
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price.unwrap_or(0.0) * f64::from(self.quantity)
    }
}

/// An order to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub store_id: StoreId,
    pub pickup_time: DateTime<Utc>,
    pub items: Vec<CartLine>,
}

impl NewOrder {
    pub fn new(store_id: impl Into<StoreId>, pickup_time: DateTime<Utc>, items: Vec<CartLine>) -> Self {
        Self {
            store_id: store_id.into(),
            pickup_time,
            items,
        }
    }

    /// Sum of `unit_price * quantity` in CHF, rounded to cents after summing.
    pub fn total(&self) -> Money {
        Money::from_decimal_sum(self.items.iter().map(CartLine::line_total), Currency::CHF)
    }

    pub(crate) fn payload(&self) -> OrderPayload<'_> {
        OrderPayload {
            store_id: &self.store_id,
            pickup_time: self.pickup_time,
            total_amount_chf: self.total().to_decimal(),
            items: &self.items,
        }
    }
}

/// Wire body of `POST /orders`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderPayload<'a> {
    store_id: &'a StoreId,
    pickup_time: DateTime<Utc>,
    #[serde(rename = "totalAmountCHF")]
    total_amount_chf: f64,
    items: &'a [CartLine],
}

fn status_or_pending<'de, D>(d: D) -> Result<OrderStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => OrderStatus::from(s),
        _ => OrderStatus::Pending,
    })
}
