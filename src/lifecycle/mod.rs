//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Load config → Validate → Init observability → Serve
//!
//! Shutdown (shutdown.rs + signals.rs):
//!     SIGINT/SIGTERM → Shutdown broadcast → server drains → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
