//! Session management module.
//!
//! Sessions hold the per-conversation dialogue state: the pending intent,
//! its retry counter and captured slots. They live in memory for the life
//! of the process, or until evicted as idle.

mod key;
mod slots;
mod store;

pub use key::{SessionKey, DEFAULT_SESSION};
pub use slots::{Slot, Slots};
pub use store::{spawn_sweeper, Session, SessionHandle, SessionStore};
