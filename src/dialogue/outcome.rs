//! Structured result of one dialogue turn.

use rust_decimal::Decimal;

use crate::backend::{OrderStatus, Refund};
use crate::nlu::{CarrierStatus, Intent};

/// What the engine decided for a turn, before it is rendered to text.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Greeting,
    Goodbye,
    AgentHandoff,

    /// The pending flow's slot could not be read; the user may try again.
    SlotRetry { intent: Intent },
    /// Slot capture failed too many times; the flow was dropped.
    SlotEscalation { intent: Intent },

    /// An order id is needed to continue `intent`.
    OrderIdRequired { intent: Intent },
    RefundIdRequired,

    OrderNotFound { intent: Intent, order_id: String },

    /// Order exists but has no tracking number yet.
    AwaitingShipment { order_id: String, status: OrderStatus },
    /// Order has a tracking number the carrier does not know.
    TrackingUnavailable { order_id: String, last_event: String },
    Tracked {
        order_id: String,
        status: CarrierStatus,
        eta: Option<String>,
    },

    RefundIneligible { order_id: String, status: OrderStatus },
    RefundCreated {
        refund_id: String,
        order_id: String,
        amount: Decimal,
        sla_days: u32,
    },
    RefundNotFound { refund_id: String },
    RefundFound { refund: Refund },

    ComplaintExists { order_id: String, ticket_id: String },
    ComplaintRegistered {
        ticket_id: String,
        order_id: String,
        sla_hours: u32,
    },

    ReturnWindowExpired { order_id: String, days_elapsed: i64 },
    ReturnScheduled {
        return_id: String,
        order_id: String,
        pickup_window: String,
    },

    /// No flow in progress and nothing recognised.
    Fallback,
    /// The turn failed; hand over to a person.
    Escalated,
}

impl Outcome {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Greeting => "greeting",
            Outcome::Goodbye => "goodbye",
            Outcome::AgentHandoff => "agent_handoff",
            Outcome::SlotRetry { .. } => "slot_retry",
            Outcome::SlotEscalation { .. } => "slot_escalation",
            Outcome::OrderIdRequired { .. } => "order_id_required",
            Outcome::RefundIdRequired => "refund_id_required",
            Outcome::OrderNotFound { .. } => "order_not_found",
            Outcome::AwaitingShipment { .. } => "awaiting_shipment",
            Outcome::TrackingUnavailable { .. } => "tracking_unavailable",
            Outcome::Tracked { .. } => "tracked",
            Outcome::RefundIneligible { .. } => "refund_ineligible",
            Outcome::RefundCreated { .. } => "refund_created",
            Outcome::RefundNotFound { .. } => "refund_not_found",
            Outcome::RefundFound { .. } => "refund_found",
            Outcome::ComplaintExists { .. } => "complaint_exists",
            Outcome::ComplaintRegistered { .. } => "complaint_registered",
            Outcome::ReturnWindowExpired { .. } => "return_window_expired",
            Outcome::ReturnScheduled { .. } => "return_scheduled",
            Outcome::Fallback => "fallback",
            Outcome::Escalated => "escalated",
        }
    }

    /// Whether the outcome hands the user to a human.
    pub fn is_escalation(&self) -> bool {
        matches!(
            self,
            Outcome::AgentHandoff | Outcome::SlotEscalation { .. } | Outcome::Escalated
        )
    }
}
