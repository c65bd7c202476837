//! Server-computed mutation capabilities

use serde::{Deserialize, Serialize};

/// What the current actor may attempt on a given order.
///
/// Computed server-side from role and permissions and embedded in each
/// staff-scoped snapshot; the client only reflects it and gates controls on
/// it. An absent flag reads false, so a capability is never assumed by
/// default. Must not be cached independently of the snapshot it arrived
/// with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    #[serde(default)]
    pub can_change_status: bool,
    #[serde(default)]
    pub can_set_pricing: bool,
    #[serde(default)]
    pub can_view_financial: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_read_false() {
        let caps: CapabilitySet = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(caps, CapabilitySet::default());
        assert!(!caps.can_change_status);
    }
}
