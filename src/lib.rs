//! GeoIP Domain Routing Gateway Library

pub mod config;
pub mod geo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use geo::{CountryResolver, ResolvedCountry, UNKNOWN_COUNTRY};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{DomainMap, RoutingDecision};
