//! Reply text for each [`Outcome`].

use rust_decimal::Decimal;

use super::Outcome;
use crate::nlu::Intent;

fn money(amount: &Decimal) -> String {
    format!("₹{}", amount.normalize())
}

impl Outcome {
    /// Render the reply shown to the user.
    pub fn render(&self) -> String {
        match self {
            Outcome::Greeting => "Hi! I can help with tracking, refunds, returns, and complaints. \
                                  What would you like to do?"
                .to_string(),
            Outcome::Goodbye => "Thanks for chatting. Have a great day!".to_string(),
            Outcome::AgentHandoff => {
                "Connecting you to a human agent... (simulated handoff)".to_string()
            }

            Outcome::SlotRetry { intent } => match intent {
                Intent::RegisterComplaint => "Please share a valid Order ID like ORD1001.",
                _ => "That doesn’t look like a valid Order ID. Please try again (e.g., ORD1001).",
            }
            .to_string(),
            Outcome::SlotEscalation { intent } => match intent {
                Intent::RegisterComplaint => {
                    "I couldn’t capture the Order ID. Escalating to an agent."
                }
                _ => "I couldn’t capture a valid Order ID. Let me connect you to an agent.",
            }
            .to_string(),

            Outcome::OrderIdRequired { intent } => match intent {
                Intent::TrackOrder => "Sure, please share your Order ID (e.g., ORD1001).",
                Intent::InitiateRefund => "Sure. Please provide your Order ID to start a refund.",
                Intent::RegisterComplaint => "Please share your Order ID to register a complaint.",
                Intent::CreateReturn => "Please share your Order ID to start a return.",
                _ => "Please share your Order ID (e.g., ORD1001).",
            }
            .to_string(),
            Outcome::RefundIdRequired => "Please provide a Refund ID (e.g., RFD-XXXX).".to_string(),

            Outcome::OrderNotFound { intent, order_id } => match intent {
                Intent::TrackOrder => format!("I couldn’t find {}. Please double-check.", order_id),
                Intent::CreateReturn => format!("Order {} not found.", order_id),
                _ => format!("I couldn’t find {}.", order_id),
            },

            Outcome::AwaitingShipment { order_id, status } => format!(
                "Order {} is currently *{}*. No tracking yet. Summary: waiting for shipment.",
                order_id, status
            ),
            Outcome::TrackingUnavailable {
                order_id,
                last_event,
            } => format!(
                "Tracking info unavailable for {}. Last event: {}.",
                order_id, last_event
            ),
            Outcome::Tracked {
                order_id,
                status,
                eta,
            } => format!(
                "Order {} is *{}*. ETA: {}. Summary: Order {}, status {}.",
                order_id,
                status.label(),
                eta.as_deref().unwrap_or("unknown"),
                order_id,
                status
            ),

            Outcome::RefundIneligible { order_id, status } => format!(
                "Order {} is *{}*. Refund not available yet.",
                order_id, status
            ),
            Outcome::RefundCreated {
                refund_id,
                order_id,
                amount,
                sla_days,
            } => format!(
                "Refund created: {}, amount {}, SLA {} days. Summary: Refund for {}.",
                refund_id,
                money(amount),
                sla_days,
                order_id
            ),
            Outcome::RefundNotFound { refund_id } => format!("Refund {} not found.", refund_id),
            Outcome::RefundFound { refund } => format!(
                "Refund {} is *{}*. Amount {}, SLA {} days. Summary: refund status checked.",
                refund.refund_id,
                refund.status,
                money(&refund.amount),
                refund.sla_days
            ),

            Outcome::ComplaintExists { ticket_id, .. } => format!(
                "You already have a complaint: {}. Do you want to escalate?",
                ticket_id
            ),
            Outcome::ComplaintRegistered {
                ticket_id,
                sla_hours,
                ..
            } => format!(
                "Complaint registered: {}, SLA {}h. Summary: complaint created.",
                ticket_id, sla_hours
            ),

            Outcome::ReturnWindowExpired { days_elapsed, .. } => format!(
                "Return window expired ({} days). Summary: return rejected.",
                days_elapsed
            ),
            Outcome::ReturnScheduled {
                return_id,
                pickup_window,
                ..
            } => format!(
                "Return created: {}, pickup on {}. Summary: return scheduled.",
                return_id, pickup_window
            ),

            Outcome::Fallback => "Sorry, I didn’t understand. I can help with: track order, \
                                  refund, complaint, return, or agent handoff."
                .to_string(),
            Outcome::Escalated => {
                "Something went wrong. Let me connect you to an agent.".to_string()
            }
        }
    }
}
