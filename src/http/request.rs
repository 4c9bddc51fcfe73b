//! Request handling and inspection helpers.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Select the client IP used for geolocation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - IP selection is deterministic and side-effect-free: override parameter
//!   (when enabled), then forwarded header, then socket peer address
//! - A malformed override or forwarded value is ignored, never an error

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Select the client IP a request should be geolocated by.
///
/// Order of precedence:
/// 1. the `ip` query parameter, when overriding is enabled and the value
///    parses as an IP address;
/// 2. the first hop of `X-Forwarded-For`, when present and parsable;
/// 3. the connection peer address recorded by the server.
pub fn client_ip<B>(req: &Request<B>, allow_ip_override: bool) -> Option<IpAddr> {
    if allow_ip_override {
        if let Some(ip) = override_ip(req) {
            return Some(ip);
        }
    }
    forwarded_ip(req).or_else(|| peer_ip(req))
}

/// The `ip` query parameter, if present and well-formed.
fn override_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    let query = req.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "ip")
        .and_then(|(_, value)| value.parse().ok())
}

/// First hop of X-Forwarded-For, the address the edge observed.
fn forwarded_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
}

fn peer_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<()> {
        Request::builder()
            .uri(uri)
            .extension(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 43210))))
            .body(())
            .unwrap()
    }

    #[test]
    fn peer_address_is_the_default_source() {
        let req = request("/");
        assert_eq!(client_ip(&req, false), Some(IpAddr::from([10, 0, 0, 1])));
    }

    #[test]
    fn override_param_wins_when_enabled() {
        let req = request("/?ip=203.0.113.7");
        assert_eq!(client_ip(&req, true), Some(IpAddr::from([203, 0, 113, 7])));
    }

    #[test]
    fn override_param_ignored_when_disabled() {
        let req = request("/?ip=203.0.113.7");
        assert_eq!(client_ip(&req, false), Some(IpAddr::from([10, 0, 0, 1])));
    }

    #[test]
    fn malformed_override_falls_back_to_connection_ip() {
        let req = request("/?ip=not-an-address");
        assert_eq!(client_ip(&req, true), Some(IpAddr::from([10, 0, 0, 1])));
    }

    #[test]
    fn forwarded_header_beats_peer_address() {
        let req = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "198.51.100.4, 10.0.0.1")
            .extension(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 43210))))
            .body(())
            .unwrap();
        assert_eq!(client_ip(&req, false), Some(IpAddr::from([198, 51, 100, 4])));
    }

    #[test]
    fn no_sources_yields_none() {
        let req = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(client_ip(&req, true), None);
    }
}
