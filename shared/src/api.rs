//! Wire DTOs for the order API
//!
//! Request and response shapes shared between the client and the API mock,
//! mirroring the consumed surface one-to-one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    CapabilitySet, Order, OrderId, OrderItem, OrderMessage, OrderStatus, OrderSummary, Payment,
    PaymentStatus,
};

/// Plain acknowledgement for mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

/// Error body carried by non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================================
// Customer API
// =============================================================================

/// `GET /orders/mine` and `GET /orders/staff/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderSummary>,
}

/// `POST /orders/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub title: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub ok: bool,
    pub order_id: OrderId,
}

/// `GET /orders/{id}/detail`: customer-scoped snapshot. Internal notes are
/// excluded server-side; the client never filters locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub messages: Vec<OrderMessage>,
    pub payments: Vec<Payment>,
}

/// `POST /orders/{id}/message` and `POST /orders/staff/{id}/note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

// =============================================================================
// Staff API
// =============================================================================

/// `GET /orders/staff/{id}/detail`: elevated snapshot with the capability
/// set embedded alongside it, refreshed atomically with the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffOrderDetailResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub messages: Vec<OrderMessage>,
    pub payments: Vec<Payment>,
    #[serde(flatten)]
    pub capabilities: CapabilitySet,
}

/// `POST /orders/staff/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// `POST /orders/staff/{id}/pricing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
}

/// `POST /orders/staff/{id}/payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub method: String,
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_flags_flatten_into_staff_detail() {
        let detail: StaffOrderDetailResponse = serde_json::from_value(serde_json::json!({
            "order": {
                "id": 1,
                "title": "Suit",
                "customer": "alice",
                "status": "new",
                "status_label": "New",
                "total_price": 0,
                "deposit_amount": 0,
                "created_at": "2026-08-01T10:00:00Z",
            },
            "items": [],
            "messages": [],
            "payments": [],
            "can_change_status": true,
            "can_view_financial": false,
        }))
        .unwrap();

        assert!(detail.capabilities.can_change_status);
        // absent flag reads false, never true by default
        assert!(!detail.capabilities.can_set_pricing);
        assert!(!detail.capabilities.can_view_financial);
    }
}
