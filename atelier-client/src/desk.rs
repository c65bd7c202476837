//! Desks own the displayed regions for one screen
//!
//! A desk runs the cycle the whole layer is built around: fetch a snapshot,
//! project it, replace the rendered regions wholesale, and after every
//! successful mutation re-pull full state from the server instead of
//! patching locally. A failed command leaves the held view untouched and
//! returns the carried message; a failed load renders an inline error
//! block. One request is in flight per user action; the last refresh to
//! complete wins the displayed state.

use tracing::warn;

use crate::commands::{MessageDraft, OrderDraft, PaymentDraft, PricingDraft, Submission};
use crate::orders::OrderApi;
use crate::render::{self, OrderScreen, Regions};
use crate::{ClientError, ClientResult};
use shared::models::{CapabilitySet, OrderId, OrderStatus};

// =============================================================================
// Customer screens
// =============================================================================

/// Customer view of a single order: header, thread, ledger, message box.
#[derive(Debug)]
pub struct CustomerDesk {
    api: OrderApi,
    order_id: OrderId,
    regions: Regions,
    pub message_draft: MessageDraft,
}

impl CustomerDesk {
    pub fn new(api: OrderApi, order_id: OrderId) -> Self {
        Self {
            api,
            order_id,
            regions: Regions::default(),
            message_draft: MessageDraft::default(),
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// The currently displayed regions.
    pub fn view(&self) -> &Regions {
        &self.regions
    }

    /// Fetch the snapshot and fully replace the rendered regions. A failed
    /// load renders an inline error block instead.
    pub async fn load(&mut self) -> &Regions {
        match self.api.my_order_detail(self.order_id).await {
            Ok(detail) => self.regions = OrderScreen::customer(&detail).to_regions(),
            Err(err) => {
                warn!(order_id = self.order_id, %err, "customer detail load failed");
                self.regions = Regions::failed(&err.user_message());
            }
        }
        &self.regions
    }

    /// Send the message draft. Empty trimmed input is skipped without a
    /// request; on success the detail is re-fetched and the draft cleared.
    pub async fn send_message(&mut self) -> ClientResult<Submission> {
        let Some(text) = self.message_draft.normalized() else {
            return Ok(Submission::Skipped);
        };
        self.api.send_message(self.order_id, &text).await?;
        self.message_draft.clear();
        self.load().await;
        Ok(Submission::Sent)
    }
}

/// Customer order list plus the creation form.
#[derive(Debug)]
pub struct CustomerOrders {
    api: OrderApi,
    region: String,
    pub order_draft: OrderDraft,
}

impl CustomerOrders {
    pub fn new(api: OrderApi) -> Self {
        Self {
            api,
            region: String::new(),
            order_draft: OrderDraft::default(),
        }
    }

    pub fn view(&self) -> &str {
        &self.region
    }

    /// Fetch and render the list; failures render an inline error block.
    pub async fn load(&mut self) -> &str {
        self.region = match self.api.my_orders().await {
            Ok(list) => render::customer_list(&list),
            Err(err) => {
                warn!(%err, "order list load failed");
                render::error_block(&err.user_message())
            }
        };
        &self.region
    }

    /// Create an order from the draft and hand back a loaded desk for the
    /// new order (the navigate-to-detail success effect).
    pub async fn create_order(&mut self) -> ClientResult<CustomerDesk> {
        let request = self.order_draft.normalized()?;
        let created = self.api.create_order(&request).await?;
        self.order_draft = OrderDraft::default();

        let mut desk = CustomerDesk::new(self.api.clone(), created.order_id);
        desk.load().await;
        Ok(desk)
    }
}

// =============================================================================
// Staff screens
// =============================================================================

/// Staff view of a single order: elevated header, tagged thread, ledger,
/// and the capability-gated mutation controls.
#[derive(Debug)]
pub struct StaffDesk {
    api: OrderApi,
    order_id: OrderId,
    regions: Regions,
    /// From the last snapshot, refreshed atomically with it. Defaults to
    /// all-false, so no control is invocable before the first load.
    capabilities: CapabilitySet,
    pub note_draft: MessageDraft,
    pub pricing_draft: PricingDraft,
    pub payment_draft: PaymentDraft,
}

impl StaffDesk {
    pub fn new(api: OrderApi, order_id: OrderId) -> Self {
        Self {
            api,
            order_id,
            regions: Regions::default(),
            capabilities: CapabilitySet::default(),
            note_draft: MessageDraft::default(),
            pricing_draft: PricingDraft::default(),
            payment_draft: PaymentDraft::default(),
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn view(&self) -> &Regions {
        &self.regions
    }

    /// Capability set from the last snapshot.
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    /// Status options offered by the status control.
    pub fn status_options(&self) -> &'static [OrderStatus] {
        &OrderStatus::ALL
    }

    /// Fetch the elevated snapshot, replace the regions, refresh the
    /// capability set and pre-fill the pricing form from the order.
    pub async fn load(&mut self) -> &Regions {
        match self.api.staff_order_detail(self.order_id).await {
            Ok(detail) => {
                self.capabilities = detail.capabilities;
                self.pricing_draft = PricingDraft {
                    total_price: detail.order.total_price.to_string(),
                    deposit_amount: detail.order.deposit_amount.to_string(),
                };
                self.regions = OrderScreen::staff(&detail).to_regions();
            }
            Err(err) => {
                warn!(order_id = self.order_id, %err, "staff detail load failed");
                // stale capabilities never outlive the snapshot they came with
                self.capabilities = CapabilitySet::default();
                self.regions = Regions::failed(&err.user_message());
            }
        }
        &self.regions
    }

    /// Submit a status change. The control is only invocable while the
    /// server granted `can_change_status`; transition rules stay
    /// server-side and any rejection comes back as the carried message.
    pub async fn change_status(&mut self, status: OrderStatus) -> ClientResult<()> {
        if !self.capabilities.can_change_status {
            return Err(ClientError::ControlDisabled("status"));
        }
        self.api.change_status(self.order_id, status).await?;
        self.load().await;
        Ok(())
    }

    /// Submit the pricing form (blank fields coerce to 0).
    pub async fn set_pricing(&mut self) -> ClientResult<()> {
        if !self.capabilities.can_set_pricing {
            return Err(ClientError::ControlDisabled("pricing"));
        }
        let request = self.pricing_draft.normalized()?;
        self.api.set_pricing(self.order_id, &request).await?;
        self.load().await;
        Ok(())
    }

    /// Append an internal note. Notes need staff scope only; no capability
    /// flag gates them.
    pub async fn add_note(&mut self) -> ClientResult<Submission> {
        let Some(text) = self.note_draft.normalized() else {
            return Ok(Submission::Skipped);
        };
        self.api.add_note(self.order_id, &text).await?;
        self.note_draft.clear();
        self.load().await;
        Ok(Submission::Sent)
    }

    /// Record a payment from the payment form.
    pub async fn add_payment(&mut self) -> ClientResult<()> {
        if !self.capabilities.can_view_financial {
            return Err(ClientError::ControlDisabled("payment"));
        }
        let request = self.payment_draft.normalized()?;
        self.api.add_payment(self.order_id, &request).await?;
        self.payment_draft = PaymentDraft::default();
        self.load().await;
        Ok(())
    }
}

/// Staff list of all orders.
#[derive(Debug)]
pub struct StaffOrders {
    api: OrderApi,
    region: String,
}

impl StaffOrders {
    pub fn new(api: OrderApi) -> Self {
        Self {
            api,
            region: String::new(),
        }
    }

    pub fn view(&self) -> &str {
        &self.region
    }

    pub async fn load(&mut self) -> &str {
        self.region = match self.api.staff_orders().await {
            Ok(list) => render::staff_list(&list),
            Err(err) => {
                warn!(%err, "staff list load failed");
                render::error_block(&err.user_message())
            }
        };
        &self.region
    }
}
