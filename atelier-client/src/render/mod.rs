//! View renderer
//!
//! Projects order snapshots and capability sets into role-tagged display
//! models, then into markup strings. Each region is rendered independently
//! and replaced wholesale; empty collections render literal placeholders
//! rather than empty containers. Every untrusted string passes through the
//! escaper before landing in markup.

pub mod escape;

pub use escape::esc;

use chrono::{DateTime, Utc};

use shared::api::{OrderDetailResponse, OrderListResponse, StaffOrderDetailResponse};
use shared::models::{CapabilitySet, Order, OrderMessage, OrderSummary, Payment};

/// Empty-state placeholders.
pub const NO_MESSAGES: &str = "No messages.";
pub const NO_PAYMENTS: &str = "No payments.";
pub const NO_ORDERS_YET: &str = "No orders yet.";
pub const NO_ORDERS: &str = "No orders.";

/// Timestamp presentation; a detail, not a contract.
fn fmt_time(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// Role-tagged header projection. Each variant carries only the fields its
/// role is guaranteed to receive.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderView {
    Customer {
        title: String,
        status_label: String,
        total: String,
        deposit: String,
    },
    Staff {
        title: String,
        customer: String,
        status_label: String,
        total: String,
        deposit: String,
        capabilities: CapabilitySet,
    },
}

impl HeaderView {
    fn customer(order: &Order) -> Self {
        Self::Customer {
            title: order.title.clone(),
            status_label: order.status_label.clone(),
            total: order.total_price.to_string(),
            deposit: order.deposit_amount.to_string(),
        }
    }

    fn staff(order: &Order, capabilities: CapabilitySet) -> Self {
        Self::Staff {
            title: order.title.clone(),
            customer: order.customer.clone().unwrap_or_else(|| "unknown".to_string()),
            status_label: order.status_label.clone(),
            total: order.total_price.to_string(),
            deposit: order.deposit_amount.to_string(),
            capabilities,
        }
    }

    pub fn to_markup(&self) -> String {
        match self {
            Self::Customer {
                title,
                status_label,
                total,
                deposit,
            } => format!(
                "<div><b>{}</b></div>\
                 <div class=\"small\">Status: <span class=\"badge\">{}</span></div>\
                 <div class=\"small\">Total: {total} | Deposit: {deposit}</div>",
                esc(title),
                esc(status_label),
            ),
            Self::Staff {
                title,
                customer,
                status_label,
                total,
                deposit,
                capabilities,
            } => format!(
                "<div><b>{}</b></div>\
                 <div class=\"small\">Customer: {}</div>\
                 <div class=\"small\">Status: <span class=\"badge\">{}</span></div>\
                 <div class=\"small\">Total: {total} | Deposit: {deposit}</div>\
                 <div class=\"small\">Capabilities: status={} | pricing={} | financial={}</div>",
                esc(title),
                esc(customer),
                esc(status_label),
                capabilities.can_change_status,
                capabilities.can_set_pricing,
                capabilities.can_view_financial,
            ),
        }
    }
}

/// Marker distinguishing staff notes from customer messages in the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadTag {
    Internal,
    Customer,
}

impl ThreadTag {
    pub fn label(self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::Customer => "Customer",
        }
    }
}

/// One entry in the message thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadEntry {
    pub sender: String,
    pub body: String,
    pub timestamp: String,
    /// Staff views tag every entry; customer views carry no tag.
    pub tag: Option<ThreadTag>,
}

impl ThreadEntry {
    fn new(message: &OrderMessage, tagged: bool) -> Self {
        Self {
            sender: message.sender.clone(),
            body: message.message.clone(),
            timestamp: fmt_time(&message.created_at),
            tag: tagged.then(|| {
                if message.is_internal {
                    ThreadTag::Internal
                } else {
                    ThreadTag::Customer
                }
            }),
        }
    }

    fn to_markup(&self) -> String {
        let tag = self
            .tag
            .map(|t| format!(" <span class=\"badge\">{}</span>", t.label()))
            .unwrap_or_default();
        format!(
            "<div class=\"thread-entry\">\
             <div class=\"small\"><b>{}</b> - {}{tag}</div>\
             <div>{}</div>\
             </div>",
            esc(&self.sender),
            self.timestamp,
            esc(&self.body),
        )
    }
}

/// One entry in the payment ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub amount: String,
    pub status_label: String,
    pub timestamp: String,
}

impl LedgerEntry {
    fn new(payment: &Payment) -> Self {
        Self {
            amount: payment.amount.to_string(),
            status_label: payment.status_label.clone(),
            timestamp: fmt_time(&payment.created_at),
        }
    }

    fn to_markup(&self) -> String {
        format!(
            "<div class=\"ledger-entry\">\
             <div><b>{}</b> - <span class=\"badge\">{}</span></div>\
             <div class=\"small\">{}</div>\
             </div>",
            self.amount,
            esc(&self.status_label),
            self.timestamp,
        )
    }
}

/// Display model for one order screen.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderScreen {
    pub header: HeaderView,
    pub thread: Vec<ThreadEntry>,
    pub ledger: Vec<LedgerEntry>,
}

impl OrderScreen {
    /// Project a customer-scoped snapshot.
    pub fn customer(detail: &OrderDetailResponse) -> Self {
        Self {
            header: HeaderView::customer(&detail.order),
            thread: detail
                .messages
                .iter()
                .map(|m| ThreadEntry::new(m, false))
                .collect(),
            ledger: detail.payments.iter().map(LedgerEntry::new).collect(),
        }
    }

    /// Project a staff snapshot with its capability set.
    pub fn staff(detail: &StaffOrderDetailResponse) -> Self {
        Self {
            header: HeaderView::staff(&detail.order, detail.capabilities),
            thread: detail
                .messages
                .iter()
                .map(|m| ThreadEntry::new(m, true))
                .collect(),
            ledger: detail.payments.iter().map(LedgerEntry::new).collect(),
        }
    }

    /// Render all regions to markup.
    pub fn to_regions(&self) -> Regions {
        let thread = if self.thread.is_empty() {
            format!("<div class=\"small\">{NO_MESSAGES}</div>")
        } else {
            self.thread.iter().map(ThreadEntry::to_markup).collect()
        };
        let ledger = if self.ledger.is_empty() {
            format!("<div class=\"small\">{NO_PAYMENTS}</div>")
        } else {
            self.ledger.iter().map(LedgerEntry::to_markup).collect()
        };
        Regions {
            header: self.header.to_markup(),
            thread,
            ledger,
        }
    }
}

/// Region markup for one rendered order screen; the display surface
/// replaces each region wholesale, never patches it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Regions {
    pub header: String,
    pub thread: String,
    pub ledger: String,
}

impl Regions {
    /// Inline error block shown when a load fails; other regions clear.
    pub fn failed(message: &str) -> Self {
        Self {
            header: error_block(message),
            thread: String::new(),
            ledger: String::new(),
        }
    }
}

/// Inline error block markup.
pub fn error_block(message: &str) -> String {
    format!("<div class=\"error\">{}</div>", esc(message))
}

fn summary_card(order: &OrderSummary, with_customer: bool) -> String {
    let customer = if with_customer {
        format!(
            "Customer: {} | ",
            esc(order.customer.as_deref().unwrap_or("unknown"))
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"card\">\
         <div><b>#{}</b> - {}</div>\
         <div class=\"small\">{customer}Status: <span class=\"badge\">{}</span> | Total: {} | Deposit: {}</div>\
         </div>",
        order.id,
        esc(&order.title),
        esc(&order.status_label),
        order.total_price,
        order.deposit_amount,
    )
}

/// Render the customer order list region.
pub fn customer_list(list: &OrderListResponse) -> String {
    if list.orders.is_empty() {
        return format!("<div class=\"small\">{NO_ORDERS_YET}</div>");
    }
    list.orders.iter().map(|o| summary_card(o, false)).collect()
}

/// Render the staff order list region.
pub fn staff_list(list: &OrderListResponse) -> String {
    if list.orders.is_empty() {
        return format!("<div class=\"small\">{NO_ORDERS}</div>");
    }
    list.orders.iter().map(|o| summary_card(o, true)).collect()
}
