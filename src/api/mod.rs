//! HTTP API for order-desk.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1/` - Service information
//! - `POST /chat` - Send a message, get a reply
//! - `POST /api/v1/chat` - Same as `/chat`
//!
//! A chat request is `{"message": "...", "session": "..."}`; the reply is
//! `{"reply": "..."}`. Messages without a session share the `default`
//! conversation.
//!
//! ## Example
//!
//! ```no_run
//! use order_desk::api::{serve_with_state, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> order_desk::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 4000);
//!     serve_with_state(config, AppState::in_memory()).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve_with_state, ServerConfig};
pub use types::{ApiInfoResponse, ChatRequest, ChatResponse};
