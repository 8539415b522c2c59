//! Customer order records.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use spoolhouse_core::{ItemStatus, OrderId, ProductId, SalesChannel, lenient};

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product being ordered.
    #[serde(default, deserialize_with = "lenient::id")]
    pub product_id: ProductId,
    /// Units ordered.
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: u32,
    /// Units already produced, `0..=quantity`.
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub ready_quantity: u32,
    /// Agreed price per unit.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Decimal,
    /// Production status.
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: ItemStatus,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Document ID.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: OrderId,
    /// Customer name or handle.
    #[serde(default, deserialize_with = "lenient::string")]
    pub customer: String,
    /// Day the order was taken.
    #[serde(
        default,
        deserialize_with = "lenient::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_date: Option<NaiveDate>,
    /// Time of day the order was taken.
    #[serde(
        default,
        deserialize_with = "lenient::time",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_time: Option<NaiveTime>,
    /// Link to the customer conversation.
    #[serde(default, deserialize_with = "lenient::string")]
    pub messenger_link: String,
    /// Free-form notes.
    #[serde(default, deserialize_with = "lenient::string")]
    pub comments: String,
    /// Whether the order was placed through the special sales channel.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_special_channel: bool,
    /// Line items.
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// The sales channel this order belongs to.
    #[must_use]
    pub const fn channel(&self) -> SalesChannel {
        SalesChannel::from_flag(self.is_special_channel)
    }
}
