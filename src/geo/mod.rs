//! Geolocation subsystem.
//!
//! # Data Flow
//! ```text
//! client IP (from request)
//!     → resolver.rs (CountryResolver trait)
//!     → mmdb.rs (MaxMind database lookup)
//!     → country display name, or the Unknown sentinel
//! ```
//!
//! # Design Decisions
//! - The resolver is injected at construction and shared read-only across
//!   all request tasks; lookups take &self
//! - Lookup failures degrade to the Unknown sentinel, they never surface
//!   as request errors
//! - The database handle is long-lived; no per-request open/close

pub mod mmdb;
pub mod resolver;

pub use mmdb::MmdbResolver;
pub use resolver::{CountryResolver, ResolvedCountry, UNKNOWN_COUNTRY};
