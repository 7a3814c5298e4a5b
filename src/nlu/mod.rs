//! Text normalization, intent classification and identifier extraction.
//!
//! Everything in this module is pure: no I/O, no shared state. The
//! dialogue engine calls into it once per turn.

mod carrier;
mod extract;
mod intent;

pub use carrier::{normalize_carrier_status, CarrierStatus};
pub use extract::{extract_order_id, extract_refund_id};
pub use intent::{classify_intent, Intent};
