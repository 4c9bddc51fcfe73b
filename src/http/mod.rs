//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, client IP selection)
//!     → middleware/geo_routing.rs (resolve country, forward or redirect)
//!     → inner application handler
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::geo_routing::{geo_routing_middleware, GeoRoutingState, X_GEOIP_COUNTRY};
pub use request::{client_ip, UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
