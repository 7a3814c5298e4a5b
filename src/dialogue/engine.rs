//! The per-turn dialogue state machine.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument};

use super::collaborators::{Clock, IdGenerator, ShortIdGenerator, SystemClock};
use super::Outcome;
use crate::backend::{Backend, BackendError, BackendResult, Complaint, Refund, ReturnRequest};
use crate::nlu::{
    classify_intent, extract_order_id, extract_refund_id, normalize_carrier_status, Intent,
};
use crate::session::{Session, SessionKey, SessionStore, Slot};
use crate::Result;

/// Days promised for a refund to reach the customer.
pub const REFUND_SLA_DAYS: u32 = 5;
/// Hours promised for a first response on a complaint.
pub const COMPLAINT_SLA_HOURS: u32 = 72;
pub const COMPLAINT_PRIORITY: &str = "Normal";
pub const RETURN_REASON: &str = "Customer requested return";
pub const RETURN_PICKUP_WINDOW: &str = "2025-09-15 10:00-14:00";

/// Tunable dialogue rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialoguePolicy {
    /// Failed slot captures tolerated before escalating.
    pub max_slot_retries: u32,
    /// Returns are accepted up to this many whole days after the order.
    pub return_window_days: i64,
    /// Upper bound on any single backend call.
    pub backend_timeout: Duration,
}

impl Default for DialoguePolicy {
    fn default() -> Self {
        Self {
            max_slot_retries: 1,
            return_window_days: 14,
            backend_timeout: Duration::from_secs(5),
        }
    }
}

/// Result of trying to resume a pending flow.
enum Continuation {
    /// Handle the pending intent this turn.
    Resume(Intent),
    /// Reply without running a handler.
    Reply(Outcome),
}

/// Classifies messages, tracks per-session flows and talks to the backend.
pub struct DialogueEngine {
    backend: Arc<dyn Backend>,
    sessions: Arc<SessionStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    policy: DialoguePolicy,
}

impl DialogueEngine {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            sessions: Arc::new(SessionStore::new()),
            ids: Arc::new(ShortIdGenerator),
            clock: Arc::new(SystemClock),
            policy: DialoguePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DialoguePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn policy(&self) -> &DialoguePolicy {
        &self.policy
    }

    /// Handle one message and return the reply text.
    ///
    /// Never fails: errors are logged and answered with an escalation.
    pub async fn reply(&self, message: &str, key: &SessionKey) -> String {
        match self.decide(message, key).await {
            Ok(outcome) => outcome.render(),
            Err(e) => {
                error!(session = %key, error = %e, "turn failed, escalating to an agent");
                Outcome::Escalated.render()
            }
        }
    }

    /// Handle one message and return the structured decision.
    ///
    /// If the turn fails the session is left exactly as it was before the
    /// message arrived, so the caller can retry the same message.
    #[instrument(level = "debug", skip(self, message), fields(session = %key))]
    pub async fn decide(&self, message: &str, key: &SessionKey) -> Result<Outcome> {
        let intent = classify_intent(message);
        let handle = self.sessions.get_or_create(key)?;
        let mut session = handle.lock().await;
        session.touch();

        if let Some(outcome) = stateless_reply(intent) {
            debug!(%intent, outcome = outcome.kind(), "stateless reply");
            return Ok(outcome);
        }

        let before = session.clone();
        let result = self.run_turn(&mut session, message, intent).await;
        match &result {
            Ok(outcome) => debug!(
                %intent,
                outcome = outcome.kind(),
                pending = ?session.pending_intent,
                retries = session.retry_count,
                "turn complete"
            ),
            Err(_) => *session = before,
        }
        result
    }

    async fn run_turn(
        &self,
        session: &mut Session,
        message: &str,
        intent: Intent,
    ) -> Result<Outcome> {
        let effective = match (session.pending_intent, intent) {
            (Some(pending), Intent::Fallback) => {
                match self.continue_flow(session, pending, message) {
                    Continuation::Resume(pending) => pending,
                    Continuation::Reply(outcome) => return Ok(outcome),
                }
            }
            _ => intent,
        };

        match effective {
            Intent::TrackOrder => self.track_order(session, message).await,
            Intent::InitiateRefund => self.initiate_refund(session, message).await,
            Intent::RefundStatus => self.refund_status(message).await,
            Intent::RegisterComplaint => self.register_complaint(session, message).await,
            Intent::CreateReturn => self.create_return(message).await,
            Intent::Fallback => Ok(Outcome::Fallback),
            Intent::Greeting | Intent::Goodbye | Intent::AgentHandoff => {
                Ok(stateless_reply(effective).unwrap_or(Outcome::Fallback))
            }
        }
    }

    /// Try to fill the slot a pending flow is waiting on.
    fn continue_flow(&self, session: &mut Session, pending: Intent, message: &str) -> Continuation {
        let Some(slot) = pending.required_slot() else {
            return Continuation::Resume(pending);
        };
        if session.slots.contains(slot) {
            return Continuation::Resume(pending);
        }

        match extract_slot(slot, message) {
            Some(value) => {
                debug!(%pending, %slot, %value, "slot captured");
                session.fill_slot(slot, value);
                Continuation::Resume(pending)
            }
            None => {
                let retries = session.record_retry();
                if retries > self.policy.max_slot_retries {
                    info!(%pending, retries, "slot capture failed, escalating");
                    session.finish_flow();
                    Continuation::Reply(Outcome::SlotEscalation { intent: pending })
                } else {
                    Continuation::Reply(Outcome::SlotRetry { intent: pending })
                }
            }
        }
    }

    /// Run a backend call under the policy timeout.
    async fn call<T, F>(&self, operation: &'static str, fut: F) -> BackendResult<T>
    where
        F: Future<Output = BackendResult<T>>,
    {
        let timeout = self.policy.backend_timeout;
        match tokio::time::timeout(timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout {
                operation,
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn track_order(&self, session: &mut Session, message: &str) -> Result<Outcome> {
        let Some(order_id) = extract_order_id(message) else {
            session.begin_flow(Intent::TrackOrder);
            return Ok(Outcome::OrderIdRequired {
                intent: Intent::TrackOrder,
            });
        };
        if session.pending_intent == Some(Intent::TrackOrder) {
            session.finish_flow();
        }

        let orders = self
            .call(
                "find_orders_by_id",
                self.backend.find_orders_by_id(&order_id),
            )
            .await?;
        let Some(order) = orders.into_iter().next() else {
            return Ok(Outcome::OrderNotFound {
                intent: Intent::TrackOrder,
                order_id,
            });
        };

        let Some(tracking_id) = order.tracking_id() else {
            return Ok(Outcome::AwaitingShipment {
                order_id: order.order_id,
                status: order.status,
            });
        };

        let shipments = self
            .call(
                "find_shipment_by_tracking",
                self.backend.find_shipment_by_tracking(tracking_id),
            )
            .await?;
        let Some(shipment) = shipments.into_iter().next() else {
            return Ok(Outcome::TrackingUnavailable {
                order_id,
                last_event: order.last_event,
            });
        };

        Ok(Outcome::Tracked {
            order_id,
            status: normalize_carrier_status(&shipment.status),
            eta: shipment.eta_iso.filter(|eta| !eta.is_empty()),
        })
    }

    async fn initiate_refund(&self, session: &mut Session, message: &str) -> Result<Outcome> {
        let Some(order_id) = resolve_order_id(session, message) else {
            session.begin_flow(Intent::InitiateRefund);
            return Ok(Outcome::OrderIdRequired {
                intent: Intent::InitiateRefund,
            });
        };

        let orders = self
            .call(
                "find_orders_by_id",
                self.backend.find_orders_by_id(&order_id),
            )
            .await?;
        let Some(order) = orders.into_iter().next() else {
            session.finish_flow();
            return Ok(Outcome::OrderNotFound {
                intent: Intent::InitiateRefund,
                order_id,
            });
        };

        if !order.status.is_refundable() {
            session.finish_flow();
            return Ok(Outcome::RefundIneligible {
                order_id,
                status: order.status,
            });
        }

        let refund = Refund {
            refund_id: format!("RFD-{}", self.ids.generate()),
            order_id: order_id.clone(),
            amount: order.total()?,
            sla_days: REFUND_SLA_DAYS,
            status: "initiated".to_string(),
            created_at: self.clock.now(),
        };
        self.call("create_refund", self.backend.create_refund(&refund))
            .await?;
        info!(refund_id = %refund.refund_id, %order_id, amount = %refund.amount, "refund created");

        session.finish_flow();
        Ok(Outcome::RefundCreated {
            refund_id: refund.refund_id,
            order_id,
            amount: refund.amount,
            sla_days: refund.sla_days,
        })
    }

    async fn refund_status(&self, message: &str) -> Result<Outcome> {
        let Some(refund_id) = extract_refund_id(message) else {
            return Ok(Outcome::RefundIdRequired);
        };

        let refunds = self
            .call(
                "find_refund_by_id",
                self.backend.find_refund_by_id(&refund_id),
            )
            .await?;
        Ok(match refunds.into_iter().next() {
            Some(refund) => Outcome::RefundFound { refund },
            None => Outcome::RefundNotFound { refund_id },
        })
    }

    async fn register_complaint(&self, session: &mut Session, message: &str) -> Result<Outcome> {
        let Some(order_id) = resolve_order_id(session, message) else {
            session.begin_flow(Intent::RegisterComplaint);
            return Ok(Outcome::OrderIdRequired {
                intent: Intent::RegisterComplaint,
            });
        };

        let existing = self
            .call(
                "find_complaints_by_order",
                self.backend.find_complaints_by_order(&order_id),
            )
            .await?;
        if let Some(complaint) = existing.into_iter().next() {
            session.finish_flow();
            return Ok(Outcome::ComplaintExists {
                order_id,
                ticket_id: complaint.ticket_id,
            });
        }

        let complaint = Complaint {
            ticket_id: format!("TCK-{}", self.ids.generate()),
            order_id: order_id.clone(),
            description: message.to_string(),
            priority: COMPLAINT_PRIORITY.to_string(),
            sla_hours: COMPLAINT_SLA_HOURS,
            created_at: self.clock.now(),
        };
        self.call("create_complaint", self.backend.create_complaint(&complaint))
            .await?;
        info!(ticket_id = %complaint.ticket_id, %order_id, "complaint registered");

        session.finish_flow();
        Ok(Outcome::ComplaintRegistered {
            ticket_id: complaint.ticket_id,
            order_id,
            sla_hours: complaint.sla_hours,
        })
    }

    async fn create_return(&self, message: &str) -> Result<Outcome> {
        // Single-shot: a missing id never starts a pending flow.
        let Some(order_id) = extract_order_id(message) else {
            return Ok(Outcome::OrderIdRequired {
                intent: Intent::CreateReturn,
            });
        };

        let orders = self
            .call(
                "find_orders_by_id",
                self.backend.find_orders_by_id(&order_id),
            )
            .await?;
        let Some(order) = orders.into_iter().next() else {
            return Ok(Outcome::OrderNotFound {
                intent: Intent::CreateReturn,
                order_id,
            });
        };

        let Some(placed_at) = order.placed_at else {
            return Err(BackendError::Malformed(format!(
                "order {} has no readable placed_at",
                order_id
            ))
            .into());
        };
        let days_elapsed = (self.clock.now() - placed_at).num_days();
        if days_elapsed > self.policy.return_window_days {
            return Ok(Outcome::ReturnWindowExpired {
                order_id,
                days_elapsed,
            });
        }

        let request = ReturnRequest {
            return_id: format!("RTN-{}", self.ids.generate()),
            order_id: order_id.clone(),
            reason: RETURN_REASON.to_string(),
            pickup_window: RETURN_PICKUP_WINDOW.to_string(),
            status: "pickup_scheduled".to_string(),
        };
        self.call("create_return", self.backend.create_return(&request))
            .await?;
        info!(return_id = %request.return_id, %order_id, "return scheduled");

        Ok(Outcome::ReturnScheduled {
            return_id: request.return_id,
            order_id,
            pickup_window: request.pickup_window,
        })
    }
}

fn stateless_reply(intent: Intent) -> Option<Outcome> {
    match intent {
        Intent::Greeting => Some(Outcome::Greeting),
        Intent::Goodbye => Some(Outcome::Goodbye),
        Intent::AgentHandoff => Some(Outcome::AgentHandoff),
        _ => None,
    }
}

fn extract_slot(slot: Slot, message: &str) -> Option<String> {
    match slot {
        Slot::OrderId => extract_order_id(message),
    }
}

/// Order id from the message, else from the session's captured slot.
fn resolve_order_id(session: &Session, message: &str) -> Option<String> {
    extract_order_id(message).or_else(|| session.slot(Slot::OrderId).map(str::to_string))
}
