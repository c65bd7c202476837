//! In-memory application state

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use shared::models::{OrderId, OrderItem, OrderMessage, OrderStatus, Payment};

// Staff permissions, mirrored from the seeded roles.
pub const VIEW_ALL_ORDERS: &str = "view_all_orders";
pub const CHANGE_ORDER_STATUS: &str = "change_order_status";
pub const SET_PRICING: &str = "set_pricing";
pub const VIEW_FINANCIAL_REPORTS: &str = "view_financial_reports";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Staff,
}

/// An actor known to the mock, addressed by a pre-issued session token.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub role: Role,
    pub permissions: Vec<&'static str>,
}

impl User {
    pub fn customer(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Customer,
            permissions: Vec::new(),
        }
    }

    pub fn staff(username: impl Into<String>, permissions: &[&'static str]) -> Self {
        Self {
            username: username.into(),
            role: Role::Staff,
            permissions: permissions.to_vec(),
        }
    }

    /// Workshop Manager: every permission.
    pub fn workshop_manager(username: impl Into<String>) -> Self {
        Self::staff(
            username,
            &[
                VIEW_ALL_ORDERS,
                CHANGE_ORDER_STATUS,
                SET_PRICING,
                VIEW_FINANCIAL_REPORTS,
            ],
        )
    }

    /// Order Operator: view and status only.
    pub fn order_operator(username: impl Into<String>) -> Self {
        Self::staff(username, &[VIEW_ALL_ORDERS, CHANGE_ORDER_STATUS])
    }

    /// Accountant: view and financial only.
    pub fn accountant(username: impl Into<String>) -> Self {
        Self::staff(username, &[VIEW_ALL_ORDERS, VIEW_FINANCIAL_REPORTS])
    }

    pub fn has_perm(&self, permission: &str) -> bool {
        self.role == Role::Staff && self.permissions.contains(&permission)
    }
}

/// Stored order record.
#[derive(Debug, Clone)]
pub struct StoredOrder {
    pub id: OrderId,
    /// Owning customer's username.
    pub customer: String,
    pub title: String,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    pub items: Vec<OrderItem>,
    /// Chronological; internal entries are filtered per-role at read time.
    pub messages: Vec<OrderMessage>,
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
}

/// Mock state: a fixed session table and an order store.
#[derive(Debug)]
pub struct AppState {
    sessions: HashMap<String, User>,
    pub orders: Mutex<HashMap<OrderId, StoredOrder>>,
    next_id: AtomicI64,
    /// Single fixed CSRF token, set as a cookie on every GET response.
    pub csrf_token: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            orders: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            csrf_token: "mock-csrf-token".to_string(),
        }
    }

    /// Register a session token for a user.
    pub fn with_user(mut self, token: impl Into<String>, user: User) -> Self {
        self.sessions.insert(token.into(), user);
        self
    }

    pub fn user_for(&self, token: &str) -> Option<User> {
        self.sessions.get(token).cloned()
    }

    pub fn next_id(&self) -> OrderId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_never_hold_staff_permissions() {
        let user = User::customer("alice");
        assert!(!user.has_perm(VIEW_ALL_ORDERS));
    }

    #[test]
    fn seeded_roles_match_their_grants() {
        let operator = User::order_operator("omid");
        assert!(operator.has_perm(CHANGE_ORDER_STATUS));
        assert!(!operator.has_perm(SET_PRICING));
        assert!(!operator.has_perm(VIEW_FINANCIAL_REPORTS));

        let accountant = User::accountant("aram");
        assert!(accountant.has_perm(VIEW_FINANCIAL_REPORTS));
        assert!(!accountant.has_perm(CHANGE_ORDER_STATUS));

        let manager = User::workshop_manager("mina");
        for perm in [
            VIEW_ALL_ORDERS,
            CHANGE_ORDER_STATUS,
            SET_PRICING,
            VIEW_FINANCIAL_REPORTS,
        ] {
            assert!(manager.has_perm(perm));
        }
    }
}
