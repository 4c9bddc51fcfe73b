//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Open geo database → Bind listener → Serve
//!
//! Shutdown:
//!     Ctrl-C or Shutdown::trigger → stop accepting → drain in-flight → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then resolver, then listener
//! - Graceful shutdown via a broadcast channel any task can subscribe to

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
