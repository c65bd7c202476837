//! Route handlers for the mock order API
//!
//! Mirrors the server contract the client trusts: customer endpoints scope
//! by the session user, staff endpoints require the staff role plus a
//! specific permission, customer-visible threads exclude internal notes,
//! and every non-GET request must echo the CSRF cookie in a header.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::state::{
    AppState, CHANGE_ORDER_STATUS, Role, SET_PRICING, StoredOrder, User, VIEW_ALL_ORDERS,
    VIEW_FINANCIAL_REPORTS,
};
use shared::api::{
    Ack, CreateOrderRequest, CreateOrderResponse, MessageRequest, OrderDetailResponse,
    OrderListResponse, PaymentRequest, PricingRequest, StaffOrderDetailResponse, StatusRequest,
};
use shared::models::{CapabilitySet, Order, OrderId, OrderMessage, OrderSummary, Payment};

const SESSION_COOKIE: &str = "session";
const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "x-csrftoken";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/orders/mine", get(my_orders))
        .route("/orders/create", post(create_order))
        .route("/orders/{id}/detail", get(my_order_detail))
        .route("/orders/{id}/message", post(add_customer_message))
        .route("/orders/staff/list", get(staff_orders))
        .route("/orders/staff/{id}/detail", get(staff_order_detail))
        .route("/orders/staff/{id}/status", post(staff_change_status))
        .route("/orders/staff/{id}/pricing", post(staff_set_pricing))
        .route("/orders/staff/{id}/note", post(staff_add_note))
        .route("/orders/staff/{id}/payment", post(staff_add_payment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ========== Request plumbing ==========

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(n, _)| *n == name)
        .map(|(_, value)| value.to_string())
}

fn authed(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = cookie(headers, SESSION_COOKIE).ok_or(ApiError::Unauthorized)?;
    state.user_for(&token).ok_or(ApiError::Unauthorized)
}

/// Non-GET requests must echo the CSRF cookie in the `X-CSRFToken` header.
fn check_csrf(headers: &HeaderMap) -> Result<(), ApiError> {
    let cookie_token = cookie(headers, CSRF_COOKIE).unwrap_or_default();
    let header_token = headers
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    if cookie_token.is_empty() || cookie_token != header_token {
        return Err(ApiError::Forbidden(
            "CSRF token missing or incorrect.".to_string(),
        ));
    }
    Ok(())
}

/// Centralized staff role + permission check.
fn require_staff_perm(user: &User, permission: &'static str) -> Result<(), ApiError> {
    if user.role != Role::Staff {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }
    if !user.has_perm(permission) {
        return Err(ApiError::Forbidden("No permission".to_string()));
    }
    Ok(())
}

/// JSON response that also (re)issues the CSRF cookie, the way the backend
/// primes browsers on every page fetch.
fn json_with_csrf<T: Serialize>(state: &AppState, body: T) -> Response {
    let mut response = Json(body).into_response();
    let cookie = format!("{CSRF_COOKIE}={}; Path=/", state.csrf_token);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Server-side trim + length cap for free-text fields.
fn clip(s: &str, max: usize) -> String {
    s.trim().chars().take(max).collect()
}

// ========== Projections ==========

fn order_dto(order: &StoredOrder, with_customer: bool) -> Order {
    Order {
        id: order.id,
        title: order.title.clone(),
        customer: with_customer.then(|| order.customer.clone()),
        status: order.status,
        status_label: order.status.label().to_string(),
        total_price: order.total_price,
        deposit_amount: order.deposit_amount,
        created_at: order.created_at,
    }
}

fn summary_dto(order: &StoredOrder, with_customer: bool) -> OrderSummary {
    OrderSummary {
        id: order.id,
        title: order.title.clone(),
        customer: with_customer.then(|| order.customer.clone()),
        status: order.status,
        status_label: order.status.label().to_string(),
        total_price: order.total_price,
        deposit_amount: order.deposit_amount,
        created_at: order.created_at,
    }
}

/// Newest first, matching the backend's list ordering.
fn sorted_desc(orders: Vec<StoredOrder>) -> Vec<StoredOrder> {
    let mut orders = orders;
    orders.sort_by_key(|o| std::cmp::Reverse(o.id));
    orders
}

// ========== Customer endpoints ==========

async fn my_orders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let user = authed(&state, &headers)?;
    let orders = state.orders.lock().expect("order store poisoned");
    let mine = sorted_desc(
        orders
            .values()
            .filter(|o| o.customer == user.username)
            .cloned()
            .collect(),
    );
    let body = OrderListResponse {
        orders: mine.iter().map(|o| summary_dto(o, false)).collect(),
    };
    Ok(json_with_csrf(&state, body))
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let user = authed(&state, &headers)?;
    check_csrf(&headers)?;

    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title required".to_string()));
    }
    if title.chars().count() > 150 {
        return Err(ApiError::BadRequest("title too long".to_string()));
    }
    for item in &request.items {
        if item.qty == 0 || item.qty > 100_000 {
            return Err(ApiError::BadRequest("Invalid qty".to_string()));
        }
    }

    let id = state.next_id();
    let order = StoredOrder {
        id,
        customer: user.username.clone(),
        title,
        status: Default::default(),
        total_price: Default::default(),
        deposit_amount: Default::default(),
        items: request
            .items
            .iter()
            .map(|item| shared::models::OrderItem {
                product_type: clip(&item.product_type, 80),
                qty: item.qty,
                size_range: clip(&item.size_range, 120),
                fabric_type: clip(&item.fabric_type, 120),
                notes: item.notes.trim().to_string(),
            })
            .collect(),
        messages: Vec::new(),
        payments: Vec::new(),
        created_at: chrono::Utc::now(),
    };
    state
        .orders
        .lock()
        .expect("order store poisoned")
        .insert(id, order);
    info!(order_id = id, customer = %user.username, "order created");

    Ok(Json(CreateOrderResponse { ok: true, order_id: id }))
}

async fn my_order_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let user = authed(&state, &headers)?;
    let orders = state.orders.lock().expect("order store poisoned");
    let order = orders
        .get(&id)
        .filter(|o| o.customer == user.username)
        .ok_or(ApiError::NotFound("Order"))?;

    let body = OrderDetailResponse {
        order: order_dto(order, false),
        items: order.items.clone(),
        // internal notes never reach the customer
        messages: order
            .messages
            .iter()
            .filter(|m| !m.is_internal)
            .cloned()
            .collect(),
        payments: order.payments.clone(),
    };
    Ok(json_with_csrf(&state, body))
}

async fn add_customer_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
    Json(request): Json<MessageRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user = authed(&state, &headers)?;
    check_csrf(&headers)?;

    let text = request.message.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty.".to_string()));
    }
    if text.chars().count() > 5000 {
        return Err(ApiError::BadRequest("Message too long.".to_string()));
    }

    let mut orders = state.orders.lock().expect("order store poisoned");
    let order = orders
        .get_mut(&id)
        .filter(|o| o.customer == user.username)
        .ok_or(ApiError::NotFound("Order"))?;
    order.messages.push(OrderMessage {
        sender: user.username,
        message: text,
        is_internal: false,
        created_at: chrono::Utc::now(),
    });
    Ok(Json(Ack { ok: true }))
}

// ========== Staff endpoints ==========

async fn staff_orders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let user = authed(&state, &headers)?;
    require_staff_perm(&user, VIEW_ALL_ORDERS)?;

    let orders = state.orders.lock().expect("order store poisoned");
    let all = sorted_desc(orders.values().cloned().collect());
    let body = OrderListResponse {
        orders: all.iter().map(|o| summary_dto(o, true)).collect(),
    };
    Ok(json_with_csrf(&state, body))
}

async fn staff_order_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let user = authed(&state, &headers)?;
    require_staff_perm(&user, VIEW_ALL_ORDERS)?;

    let orders = state.orders.lock().expect("order store poisoned");
    let order = orders.get(&id).ok_or(ApiError::NotFound("Order"))?;

    let body = StaffOrderDetailResponse {
        order: order_dto(order, true),
        items: order.items.clone(),
        messages: order.messages.clone(),
        payments: order.payments.clone(),
        capabilities: CapabilitySet {
            can_change_status: user.has_perm(CHANGE_ORDER_STATUS),
            can_set_pricing: user.has_perm(SET_PRICING),
            can_view_financial: user.has_perm(VIEW_FINANCIAL_REPORTS),
        },
    };
    Ok(json_with_csrf(&state, body))
}

async fn staff_change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user = authed(&state, &headers)?;
    check_csrf(&headers)?;
    require_staff_perm(&user, CHANGE_ORDER_STATUS)?;

    let mut orders = state.orders.lock().expect("order store poisoned");
    let order = orders.get_mut(&id).ok_or(ApiError::NotFound("Order"))?;
    order.status = request.status;

    // audit trail as internal note
    order.messages.push(OrderMessage {
        sender: user.username,
        message: format!("Status changed to: {}", request.status.label()),
        is_internal: true,
        created_at: chrono::Utc::now(),
    });
    info!(order_id = id, status = %request.status, "status changed");
    Ok(Json(Ack { ok: true }))
}

async fn staff_set_pricing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
    Json(request): Json<PricingRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user = authed(&state, &headers)?;
    check_csrf(&headers)?;
    require_staff_perm(&user, SET_PRICING)?;

    if request.total_price.is_sign_negative() || request.deposit_amount.is_sign_negative() {
        return Err(ApiError::BadRequest("Invalid price values.".to_string()));
    }

    let mut orders = state.orders.lock().expect("order store poisoned");
    let order = orders.get_mut(&id).ok_or(ApiError::NotFound("Order"))?;
    order.total_price = request.total_price;
    order.deposit_amount = request.deposit_amount;
    Ok(Json(Ack { ok: true }))
}

async fn staff_add_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
    Json(request): Json<MessageRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user = authed(&state, &headers)?;
    check_csrf(&headers)?;
    require_staff_perm(&user, VIEW_ALL_ORDERS)?;

    let text = request.message.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Note cannot be empty.".to_string()));
    }
    if text.chars().count() > 5000 {
        return Err(ApiError::BadRequest("Note too long.".to_string()));
    }

    let mut orders = state.orders.lock().expect("order store poisoned");
    let order = orders.get_mut(&id).ok_or(ApiError::NotFound("Order"))?;
    order.messages.push(OrderMessage {
        sender: user.username,
        message: text,
        is_internal: true,
        created_at: chrono::Utc::now(),
    });
    Ok(Json(Ack { ok: true }))
}

async fn staff_add_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    headers: HeaderMap,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<Ack>, ApiError> {
    let user = authed(&state, &headers)?;
    check_csrf(&headers)?;
    require_staff_perm(&user, VIEW_FINANCIAL_REPORTS)?;

    if request.amount <= rust_decimal::Decimal::ZERO {
        return Err(ApiError::BadRequest("Amount must be > 0.".to_string()));
    }
    let method = clip(&request.method, 30);
    let method = if method.is_empty() {
        "card".to_string()
    } else {
        method
    };

    let mut orders = state.orders.lock().expect("order store poisoned");
    let order = orders.get_mut(&id).ok_or(ApiError::NotFound("Order"))?;
    order.payments.push(Payment {
        amount: request.amount,
        method,
        status: request.status,
        status_label: request.status.label().to_string(),
        created_at: chrono::Utc::now(),
    });
    Ok(Json(Ack { ok: true }))
}
