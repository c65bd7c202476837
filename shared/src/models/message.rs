//! Order thread messages; internal notes are staff-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in an order's message thread, ordered by `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderMessage {
    /// Sender display name.
    pub sender: String,
    pub message: String,
    /// True only for staff-authored notes. Customer-scoped responses never
    /// contain internal entries and may omit the field; absent reads false.
    #[serde(default)]
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_internal_flag_reads_false() {
        let msg: OrderMessage = serde_json::from_value(serde_json::json!({
            "sender": "alice",
            "message": "hello",
            "created_at": "2026-08-01T10:00:00Z",
        }))
        .unwrap();
        assert!(!msg.is_internal);
    }
}
