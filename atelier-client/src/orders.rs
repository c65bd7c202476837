//! Role-scoped order queries and mutation endpoints
//!
//! One method per consumed endpoint. Detail fetches are idempotent and
//! side-effect-free; they are the single source of truth re-pulled after
//! every mutation instead of patching client-held state.

use crate::{ClientConfig, ClientResult, HttpClient};
use shared::api::{
    Ack, CreateOrderRequest, CreateOrderResponse, MessageRequest, OrderDetailResponse,
    OrderListResponse, PaymentRequest, PricingRequest, StaffOrderDetailResponse, StatusRequest,
};
use shared::models::{OrderId, OrderStatus};

/// Typed access to the order API
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: HttpClient,
}

impl OrderApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build an API handle straight from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(HttpClient::new(config)?))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ========== Customer API ==========

    /// List the session user's orders
    pub async fn my_orders(&self) -> ClientResult<OrderListResponse> {
        self.http.get("/orders/mine").await
    }

    /// Create a new order with its items
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> ClientResult<CreateOrderResponse> {
        self.http.post("/orders/create", request).await
    }

    /// Customer-scoped snapshot; internal notes are excluded server-side
    pub async fn my_order_detail(&self, id: OrderId) -> ClientResult<OrderDetailResponse> {
        self.http.get(&format!("/orders/{id}/detail")).await
    }

    /// Append a customer message to the order thread
    pub async fn send_message(&self, id: OrderId, message: &str) -> ClientResult<Ack> {
        self.http
            .post(
                &format!("/orders/{id}/message"),
                &MessageRequest {
                    message: message.to_string(),
                },
            )
            .await
    }

    // ========== Staff API ==========

    /// List all orders
    pub async fn staff_orders(&self) -> ClientResult<OrderListResponse> {
        self.http.get("/orders/staff/list").await
    }

    /// Elevated snapshot with the capability set embedded alongside it
    pub async fn staff_order_detail(&self, id: OrderId) -> ClientResult<StaffOrderDetailResponse> {
        self.http.get(&format!("/orders/staff/{id}/detail")).await
    }

    /// Submit a status change; transitions are validated server-side
    pub async fn change_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<Ack> {
        self.http
            .post(&format!("/orders/staff/{id}/status"), &StatusRequest { status })
            .await
    }

    /// Set total price and deposit
    pub async fn set_pricing(&self, id: OrderId, request: &PricingRequest) -> ClientResult<Ack> {
        self.http
            .post(&format!("/orders/staff/{id}/pricing"), request)
            .await
    }

    /// Append an internal staff note
    pub async fn add_note(&self, id: OrderId, message: &str) -> ClientResult<Ack> {
        self.http
            .post(
                &format!("/orders/staff/{id}/note"),
                &MessageRequest {
                    message: message.to_string(),
                },
            )
            .await
    }

    /// Record a payment
    pub async fn add_payment(&self, id: OrderId, request: &PaymentRequest) -> ClientResult<Ack> {
        self.http
            .post(&format!("/orders/staff/{id}/payment"), request)
            .await
    }
}
