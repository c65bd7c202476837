//! Mutation command drafts
//!
//! Drafts hold raw form text the way it was typed. `normalized` trims
//! whitespace, coerces numeric fields (blank → 0, blank qty → 1) and
//! rejects no-op submissions locally, so an empty message never reaches
//! the network.

use rust_decimal::Decimal;

use crate::{ClientError, ClientResult};
use shared::api::{CreateOrderRequest, PaymentRequest, PricingRequest};
use shared::models::{OrderItem, PaymentStatus};

/// Outcome of a command submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The request was sent and the snapshot refreshed
    Sent,
    /// A local no-op guard fired; nothing was sent
    Skipped,
}

/// Free-text draft for customer messages and staff notes.
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    pub text: String,
}

impl MessageDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Trimmed text, or `None` when the submission should be skipped.
    pub fn normalized(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Pricing form; both fields are raw text, blank coerces to 0.
#[derive(Debug, Clone, Default)]
pub struct PricingDraft {
    pub total_price: String,
    pub deposit_amount: String,
}

impl PricingDraft {
    pub fn normalized(&self) -> ClientResult<PricingRequest> {
        Ok(PricingRequest {
            total_price: parse_amount(&self.total_price, "total price")?,
            deposit_amount: parse_amount(&self.deposit_amount, "deposit amount")?,
        })
    }
}

/// Payment form; amount blank coerces to 0, method blank to "card".
#[derive(Debug, Clone, Default)]
pub struct PaymentDraft {
    pub amount: String,
    pub method: String,
    pub status: PaymentStatus,
}

impl PaymentDraft {
    pub fn normalized(&self) -> ClientResult<PaymentRequest> {
        let method = self.method.trim();
        Ok(PaymentRequest {
            amount: parse_amount(&self.amount, "amount")?,
            method: if method.is_empty() {
                "card".to_string()
            } else {
                method.to_string()
            },
            status: self.status,
        })
    }
}

/// One line item of an order creation form.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub product_type: String,
    pub qty: String,
    pub size_range: String,
    pub fabric_type: String,
    pub notes: String,
}

impl ItemDraft {
    pub fn normalized(&self) -> ClientResult<OrderItem> {
        Ok(OrderItem {
            product_type: self.product_type.trim().to_string(),
            qty: parse_qty(&self.qty)?,
            size_range: self.size_range.trim().to_string(),
            fabric_type: self.fabric_type.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Order creation form: a title plus one item.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub title: String,
    pub item: ItemDraft,
}

impl OrderDraft {
    /// Title is required; item fields are free text.
    pub fn normalized(&self) -> ClientResult<CreateOrderRequest> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ClientError::InvalidInput("title required".to_string()));
        }
        Ok(CreateOrderRequest {
            title: title.to_string(),
            items: vec![self.item.normalized()?],
        })
    }
}

fn parse_amount(raw: &str, field: &str) -> ClientResult<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    raw.parse()
        .map_err(|_| ClientError::InvalidInput(format!("{field} must be a number")))
}

fn parse_qty(raw: &str) -> ClientResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(1);
    }
    raw.parse()
        .map_err(|_| ClientError::InvalidInput("qty must be a whole number".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_is_skipped() {
        assert_eq!(MessageDraft::new("   \n ").normalized(), None);
        assert_eq!(
            MessageDraft::new("  hello ").normalized().as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn blank_pricing_fields_coerce_to_zero() {
        let draft = PricingDraft {
            total_price: "120".to_string(),
            deposit_amount: "".to_string(),
        };
        let request = draft.normalized().unwrap();
        assert_eq!(request.total_price, Decimal::from(120));
        assert_eq!(request.deposit_amount, Decimal::ZERO);
    }

    #[test]
    fn non_numeric_amount_is_rejected_locally() {
        let draft = PricingDraft {
            total_price: "lots".to_string(),
            deposit_amount: "".to_string(),
        };
        assert!(matches!(
            draft.normalized(),
            Err(ClientError::InvalidInput(_))
        ));
    }

    #[test]
    fn payment_method_defaults_to_card() {
        let draft = PaymentDraft {
            amount: "50".to_string(),
            method: "  ".to_string(),
            status: PaymentStatus::Paid,
        };
        let request = draft.normalized().unwrap();
        assert_eq!(request.method, "card");
        assert_eq!(request.amount, Decimal::from(50));
    }

    #[test]
    fn blank_qty_defaults_to_one() {
        let draft = ItemDraft {
            product_type: " shirt ".to_string(),
            ..ItemDraft::default()
        };
        let item = draft.normalized().unwrap();
        assert_eq!(item.qty, 1);
        assert_eq!(item.product_type, "shirt");
    }

    #[test]
    fn order_draft_requires_a_title() {
        let draft = OrderDraft::default();
        assert!(matches!(
            draft.normalized(),
            Err(ClientError::InvalidInput(_))
        ));
    }
}
