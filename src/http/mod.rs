//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (Axum setup, request ID, trace layers)
//!     → forward.rs (API marker check)
//!         ├─ marker present  → buffer body, relay to upstream origin
//!         └─ marker absent   → next stage of the pipeline (static assets)
//!     → response.rs (canned 502 on upstream connectivity failure)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::API_PATH_MARKER;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
