//! # order-desk
//!
//! Conversational order-support desk.
//!
//! A user sends free-text messages; the desk classifies each one into an
//! intent (track an order, start a refund, check a refund, register a
//! complaint, start a return, greet, leave, ask for a human), collects a
//! missing order id across turns, calls the order data store and answers
//! with a short reply.
//!
//! ## Features
//!
//! - **Rule-based NLU**: ordered keyword rules, regex identifier extraction
//! - **Slot filling**: per-session pending flow with bounded retries
//! - **Pluggable data store**: json-server style REST or in-memory
//! - **HTTP API**: `POST /chat` over axum
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use order_desk::{DialogueEngine, InMemoryBackend, SessionKey};
//!
//! #[tokio::main]
//! async fn main() {
//!     order_desk::logging::try_init().ok();
//!
//!     let engine = DialogueEngine::new(Arc::new(InMemoryBackend::with_demo_data()));
//!     let key = SessionKey::new("alice");
//!
//!     println!("{}", engine.reply("track my order", &key).await);
//!     println!("{}", engine.reply("ORD1001", &key).await);
//! }
//! ```

pub mod api;
pub mod backend;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod logging;
pub mod masking;
pub mod nlu;
pub mod session;

// Re-export commonly used types
pub use backend::{Backend, BackendError, HttpBackend, InMemoryBackend};
pub use dialogue::{DialogueEngine, DialoguePolicy, Outcome};
pub use error::{OrderDeskError, Result};
pub use masking::{mask_email, mask_phone};
pub use nlu::{classify_intent, extract_order_id, extract_refund_id, Intent};
pub use session::{Session, SessionKey, SessionStore};
