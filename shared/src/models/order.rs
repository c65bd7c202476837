//! Order model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque, stable order identifier.
pub type OrderId = i64;

/// Order lifecycle status.
///
/// The set is server-owned; the client offers the members as selectable
/// options and displays the server-provided `status_label`. Transitions are
/// enforced exclusively server-side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Review,
    Quoted,
    Confirmed,
    Production,
    Ready,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Full option set, in lifecycle order, for the status control.
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::New,
        OrderStatus::Review,
        OrderStatus::Quoted,
        OrderStatus::Confirmed,
        OrderStatus::Production,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    /// Wire value (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Review => "review",
            Self::Quoted => "quoted",
            Self::Confirmed => "confirmed",
            Self::Production => "production",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    /// Display label the server derives `status_label` from.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Review => "In review",
            Self::Quoted => "Quoted",
            Self::Confirmed => "Confirmed",
            Self::Production => "In production",
            Self::Ready => "Ready for delivery",
            Self::Delivered => "Delivered",
            Self::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order header as returned by detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    /// Customer display name; present in staff responses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub status: OrderStatus,
    /// Server-derived display string for `status`.
    pub status_label: String,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// One row of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub title: String,
    /// Staff list responses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub status: OrderStatus,
    pub status_label: String,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Line item, attached to an order at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub product_type: String,
    pub qty: u32,
    pub size_range: String,
    pub fabric_type: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let value = serde_json::to_value(OrderStatus::Production).unwrap();
        assert_eq!(value, serde_json::json!("production"));

        let parsed: OrderStatus = serde_json::from_value(serde_json::json!("ready")).unwrap();
        assert_eq!(parsed, OrderStatus::Ready);
    }

    #[test]
    fn status_options_cover_every_wire_value() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus =
                serde_json::from_value(serde_json::json!(status.as_str())).unwrap();
            assert_eq!(parsed, status);
        }
    }
}
