//! Identifier generation and time, injected into the engine.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Produces short opaque tokens for new refund, ticket and return ids.
///
/// The engine adds the `RFD-`, `TCK-` and `RTN-` prefixes.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Upper-cased 10-character token taken from a random UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortIdGenerator;

impl IdGenerator for ShortIdGenerator {
    fn generate(&self) -> String {
        let simple = Uuid::new_v4().simple().to_string();
        simple[..10].to_uppercase()
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
