//! End-to-end tests: desks driving the in-memory order API over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use atelier_api_mock::{AppState, User, spawn};
use atelier_client::http::GENERIC_FAILURE;
use atelier_client::render::NO_MESSAGES;
use atelier_client::{
    ClientConfig, ClientError, CustomerDesk, CustomerOrders, OrderApi, OrderStatus, StaffDesk,
    StaffOrders, Submission,
};
use rust_decimal::Decimal;
use shared::models::OrderItem;

async fn serve(state: AppState) -> SocketAddr {
    spawn(Arc::new(state)).await.expect("mock server")
}

/// Mock with the usual cast: two customers, a full-permission manager and
/// an operator without pricing/financial grants.
async fn serve_default() -> SocketAddr {
    serve(
        AppState::new()
            .with_user("alice-token", User::customer("alice"))
            .with_user("bob-token", User::customer("bob"))
            .with_user("manager-token", User::workshop_manager("mina"))
            .with_user("operator-token", User::order_operator("omid")),
    )
    .await
}

fn client(addr: SocketAddr, token: &str) -> OrderApi {
    OrderApi::from_config(&ClientConfig::new(format!("http://{addr}")).with_session_token(token))
        .expect("client")
}

/// Create an order as alice and return its id.
async fn seed_order(addr: SocketAddr, title: &str) -> i64 {
    let api = client(addr, "alice-token");
    let mut orders = CustomerOrders::new(api);
    orders.load().await;
    orders.order_draft.title = title.to_string();
    orders.order_draft.item.product_type = "shirt".to_string();
    let desk = orders.create_order().await.expect("create order");
    desk.order_id()
}

#[tokio::test]
async fn create_order_round_trip_reflects_title_and_items() {
    let addr = serve_default().await;
    let api = client(addr, "alice-token");

    let mut orders = CustomerOrders::new(api.clone());
    assert!(orders.load().await.contains("No orders yet."));

    orders.order_draft.title = "  Test ".to_string();
    orders.order_draft.item.product_type = "shirt".to_string();
    orders.order_draft.item.qty = "2".to_string();
    orders.order_draft.item.size_range = "M".to_string();
    orders.order_draft.item.fabric_type = "cotton".to_string();

    let desk = orders.create_order().await.expect("create order");
    assert!(desk.view().header.contains("Test"));
    // the form resets once the new order's detail view opens
    assert!(orders.order_draft.title.is_empty());

    let detail = api.my_order_detail(desk.order_id()).await.expect("detail");
    assert_eq!(detail.order.title, "Test");
    assert_eq!(
        detail.items,
        vec![OrderItem {
            product_type: "shirt".to_string(),
            qty: 2,
            size_range: "M".to_string(),
            fabric_type: "cotton".to_string(),
            notes: String::new(),
        }]
    );
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let addr = serve_default().await;
    let mut orders = CustomerOrders::new(client(addr, "alice-token"));
    orders.load().await;

    orders.order_draft.title = "Test".to_string();
    orders.order_draft.item.qty = "0".to_string();

    let err = orders.create_order().await.expect_err("qty rejected");
    assert_eq!(err.user_message(), "Invalid qty");
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_generic_message() {
    let addr = serve_default().await;
    let api = client(addr, "alice-token");

    let err = api
        .http()
        .get::<serde_json::Value>("/no-such-endpoint")
        .await
        .expect_err("404");
    match err {
        ClientError::Api { message, .. } => assert_eq!(message, GENERIC_FAILURE),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn mutations_without_a_csrf_cookie_are_rejected() {
    let addr = serve_default().await;
    // no prior GET, so the jar holds no csrftoken yet
    let api = client(addr, "alice-token");

    let err = api.send_message(1, "hello").await.expect_err("csrf");
    assert_eq!(err.user_message(), "CSRF token missing or incorrect.");
}

#[tokio::test]
async fn disabled_capability_controls_are_not_invocable() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Gating").await;

    // before any load no capability is assumed
    let mut cold = StaffDesk::new(client(addr, "manager-token"), order_id);
    assert!(matches!(
        cold.change_status(OrderStatus::Confirmed).await,
        Err(ClientError::ControlDisabled("status"))
    ));

    let mut desk = StaffDesk::new(client(addr, "operator-token"), order_id);
    desk.load().await;
    assert!(desk.capabilities().can_change_status);
    assert!(!desk.capabilities().can_set_pricing);
    assert!(!desk.capabilities().can_view_financial);

    desk.pricing_draft.total_price = "100".to_string();
    assert!(matches!(
        desk.set_pricing().await,
        Err(ClientError::ControlDisabled("pricing"))
    ));
    desk.payment_draft.amount = "50".to_string();
    assert!(matches!(
        desk.add_payment().await,
        Err(ClientError::ControlDisabled("payment"))
    ));

    // the granted control submits exactly the chosen value
    desk.change_status(OrderStatus::Production)
        .await
        .expect("status change");
    let detail = client(addr, "manager-token")
        .staff_order_detail(order_id)
        .await
        .expect("detail");
    assert_eq!(detail.order.status, OrderStatus::Production);
    assert_eq!(detail.order.status_label, "In production");
}

#[tokio::test]
async fn status_change_leaves_an_internal_audit_note_hidden_from_customers() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Audit").await;

    let mut staff = StaffDesk::new(client(addr, "manager-token"), order_id);
    staff.load().await;
    staff
        .change_status(OrderStatus::Confirmed)
        .await
        .expect("status change");
    assert!(staff.view().thread.contains(">Internal</span>"));
    assert!(staff.view().thread.contains("Status changed to: Confirmed"));

    // the customer sees neither the note nor an empty container
    let mut customer = CustomerDesk::new(client(addr, "alice-token"), order_id);
    customer.load().await;
    assert!(customer.view().thread.contains(NO_MESSAGES));
    assert!(!customer.view().thread.contains("Status changed"));
}

#[tokio::test]
async fn customer_messages_are_tagged_customer_in_the_staff_thread() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Thread").await;

    let mut customer = CustomerDesk::new(client(addr, "alice-token"), order_id);
    customer.load().await;
    customer.message_draft.text = "when will it be ready?".to_string();
    assert_eq!(
        customer.send_message().await.expect("send"),
        Submission::Sent
    );
    assert!(customer.message_draft.text.is_empty());

    let mut staff = StaffDesk::new(client(addr, "manager-token"), order_id);
    staff.load().await;
    assert!(staff.view().thread.contains(">Customer</span>"));
    assert!(staff.view().thread.contains("when will it be ready?"));
}

#[tokio::test]
async fn repeated_detail_fetches_render_identically() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Idempotent").await;

    let mut desk = CustomerDesk::new(client(addr, "alice-token"), order_id);
    let first = desk.load().await.clone();
    let second = desk.load().await.clone();
    assert_eq!(first, second);
}

#[tokio::test]
async fn message_markup_is_escaped_in_the_thread() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Escaping").await;

    let mut desk = CustomerDesk::new(client(addr, "alice-token"), order_id);
    desk.load().await;
    desk.message_draft.text = "<script>alert(1)</script>".to_string();
    desk.send_message().await.expect("send");

    assert!(desk.view().thread.contains("&lt;script&gt;"));
    assert!(!desk.view().thread.contains("<script>"));
}

#[tokio::test]
async fn blank_deposit_field_submits_zero() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Pricing").await;

    let api = client(addr, "manager-token");
    let mut desk = StaffDesk::new(api.clone(), order_id);
    desk.load().await;
    desk.pricing_draft.total_price = "120".to_string();
    desk.pricing_draft.deposit_amount = String::new();
    desk.set_pricing().await.expect("pricing");

    let detail = api.staff_order_detail(order_id).await.expect("detail");
    assert_eq!(detail.order.total_price, Decimal::from(120));
    assert_eq!(detail.order.deposit_amount, Decimal::ZERO);
    assert!(desk.view().header.contains("Total: 120 | Deposit: 0"));
}

#[tokio::test]
async fn empty_message_draft_is_skipped_without_a_request() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Skip").await;

    let api = client(addr, "alice-token");
    let mut desk = CustomerDesk::new(api.clone(), order_id);
    desk.load().await;
    desk.message_draft.text = "   \n".to_string();
    assert_eq!(
        desk.send_message().await.expect("skip"),
        Submission::Skipped
    );

    let detail = api.my_order_detail(order_id).await.expect("detail");
    assert!(detail.messages.is_empty());
}

#[tokio::test]
async fn customers_cannot_read_each_others_orders() {
    let addr = serve_default().await;
    let order_id = seed_order(addr, "Scoped").await;

    let err = client(addr, "bob-token")
        .my_order_detail(order_id)
        .await
        .expect_err("scoped");
    assert_eq!(err.user_message(), "Order not found");
}

#[tokio::test]
async fn failed_initial_load_renders_an_inline_error_block() {
    let addr = serve_default().await;

    let mut desk = CustomerDesk::new(client(addr, "alice-token"), 9999);
    desk.load().await;
    assert!(desk.view().header.contains("class=\"error\""));
    assert!(desk.view().header.contains("Order not found"));
}

#[tokio::test]
async fn staff_list_requires_the_staff_role() {
    let addr = serve_default().await;
    seed_order(addr, "Visible").await;

    let err = client(addr, "alice-token")
        .staff_orders()
        .await
        .expect_err("forbidden");
    assert_eq!(err.user_message(), "Forbidden");

    let mut list = StaffOrders::new(client(addr, "manager-token"));
    let view = list.load().await;
    assert!(view.contains("Customer: alice"));
    assert!(view.contains("Visible"));
}
