//! Support intents and keyword classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::Slot;

/// The classified purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Goodbye,
    AgentHandoff,
    TrackOrder,
    InitiateRefund,
    RefundStatus,
    RegisterComplaint,
    CreateReturn,
    Fallback,
}

impl Intent {
    /// Snake-case label, as used in logs and the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Goodbye => "goodbye",
            Intent::AgentHandoff => "agent_handoff",
            Intent::TrackOrder => "track_order",
            Intent::InitiateRefund => "initiate_refund",
            Intent::RefundStatus => "refund_status",
            Intent::RegisterComplaint => "register_complaint",
            Intent::CreateReturn => "create_return",
            Intent::Fallback => "fallback",
        }
    }

    /// Intents answered with a fixed reply that never touch session state.
    pub fn is_stateless(&self) -> bool {
        matches!(
            self,
            Intent::Greeting | Intent::Goodbye | Intent::AgentHandoff
        )
    }

    /// The slot a pending flow for this intent waits on, if any.
    ///
    /// `create_return` and `refund_status` are single-shot and never
    /// become pending, so they have no slot here.
    pub fn required_slot(&self) -> Option<Slot> {
        match self {
            Intent::TrackOrder | Intent::InitiateRefund | Intent::RegisterComplaint => {
                Some(Slot::OrderId)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification rules, highest priority first.
///
/// "refund status" must precede bare "refund", and the handoff keywords
/// precede greetings because "help" would otherwise never win over "hey".
const RULES: &[(&[&str], Intent)] = &[
    (&["track"], Intent::TrackOrder),
    (&["refund status"], Intent::RefundStatus),
    (&["refund"], Intent::InitiateRefund),
    (&["complaint", "complain"], Intent::RegisterComplaint),
    (&["return"], Intent::CreateReturn),
    (&["agent", "human", "help"], Intent::AgentHandoff),
    (&["hi", "hello", "hey"], Intent::Greeting),
    (&["bye", "thank"], Intent::Goodbye),
];

/// Classify free text into an [`Intent`].
///
/// Keywords are matched as substrings of the lower-cased text, so
/// "returned" counts as `return` and "this" counts as `hi`.
pub fn classify_intent(text: &str) -> Intent {
    let text = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Fallback)
}
