//! Dialogue engine.
//!
//! Each turn goes through the same steps:
//!
//! 1. classify the message into an [`Intent`](crate::nlu::Intent);
//! 2. load (or create) the caller's session and lock it for the turn;
//! 3. answer greetings, goodbyes and handoff requests directly;
//! 4. if a flow is pending and the message is not a new command, try to
//!    capture the missing slot, re-prompting or escalating on failure;
//! 5. run the intent's handler against the backend.
//!
//! Handlers return an [`Outcome`]; [`Outcome::render`] turns it into the
//! reply text. Keeping the two apart lets tests assert on decisions
//! rather than on wording.

mod collaborators;
mod engine;
mod outcome;
mod render;

pub use collaborators::{Clock, IdGenerator, ShortIdGenerator, SystemClock};
pub use engine::{
    DialogueEngine, DialoguePolicy, COMPLAINT_PRIORITY, COMPLAINT_SLA_HOURS, REFUND_SLA_DAYS,
    RETURN_PICKUP_WINDOW, RETURN_REASON,
};
pub use outcome::Outcome;
