//! Domain models

pub mod capability;
pub mod message;
pub mod order;
pub mod payment;

pub use capability::CapabilitySet;
pub use message::OrderMessage;
pub use order::{Order, OrderId, OrderItem, OrderStatus, OrderSummary};
pub use payment::{Payment, PaymentStatus};
