//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - The request ID set in the http layer flows through log events
//! - Metrics are recorded only for forwarded requests; pass-through traffic
//!   is covered by the trace layer

pub mod logging;
pub mod metrics;
