//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with key-value fields throughout
//! - Request ID flows through all log events via the tracing layer
//! - Metric updates are cheap (atomic increments), recorded once per request

pub mod logging;
pub mod metrics;
