//! Request-interception middleware.

pub mod geo_routing;
