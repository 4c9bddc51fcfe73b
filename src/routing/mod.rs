//! Routing decision subsystem.
//!
//! # Data Flow
//! ```text
//! resolved country + request facts (host, path, query)
//!     → domains.rs (canonical domain lookup with fallback)
//!     → decision.rs (forward vs. redirect)
//!     → RoutingDecision consumed by the HTTP middleware
//! ```
//!
//! # Design Decisions
//! - Decision logic is pure and synchronous; no I/O, no shared mutable state
//! - Domain map is compiled at startup and immutable at runtime
//! - Host comparison is exact (host-with-port), case-insensitive per HTTP;
//!   substring containment is deliberately not used because it can match
//!   unrelated hosts
//! - Redirects preserve the original path and query string

pub mod decision;
pub mod domains;

pub use decision::{decide, redirect_location, RequestFacts, RoutingDecision};
pub use domains::{DomainMap, MissingFallbackDomain};
