//! Payment ledger entries

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// Fixed option set for the payment form.
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    /// Wire value (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Display label the server derives `status_label` from.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }
}

/// One entry in an order's payment ledger, append-only from the client's
/// perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub amount: Decimal,
    /// Staff-entered free text ("card", "cash", a bank reference, ...).
    pub method: String,
    pub status: PaymentStatus,
    pub status_label: String,
    pub created_at: DateTime<Utc>,
}
