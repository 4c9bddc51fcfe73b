//! Geo Routing Middleware.
//! Geolocates each request by client IP and enforces the canonical domain
//! for the resolved country.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::schema::RouterConfig;
use crate::geo::resolver::{CountryResolver, ResolvedCountry, UNKNOWN_COUNTRY};
use crate::http::request::client_ip;
use crate::observability::metrics;
use crate::routing::decision::{decide, RequestFacts, RoutingDecision};
use crate::routing::domains::{DomainMap, MissingFallbackDomain};

/// Header carrying the resolved country on forwarded requests.
pub static X_GEOIP_COUNTRY: HeaderName = HeaderName::from_static("x-geoip-country");

/// State required for geo routing. Shared read-only across request tasks.
#[derive(Clone)]
pub struct GeoRoutingState {
    pub domains: Arc<DomainMap>,
    pub resolver: Arc<dyn CountryResolver>,
    pub excluded_paths: Arc<HashSet<String>>,
    pub allow_ip_override: bool,
    pub redirect_status: StatusCode,
}

impl GeoRoutingState {
    /// Build middleware state from a validated configuration and an injected
    /// resolver.
    pub fn new(
        config: &RouterConfig,
        resolver: Arc<dyn CountryResolver>,
    ) -> Result<Self, MissingFallbackDomain> {
        let domains = DomainMap::new(config.domains.clone())?;
        let excluded_paths: HashSet<String> = config.excluded_paths.iter().cloned().collect();
        // Validation restricts the status to 301/302/307.
        let redirect_status =
            StatusCode::from_u16(config.redirect.status).unwrap_or(StatusCode::FOUND);

        Ok(Self {
            domains: Arc::new(domains),
            resolver,
            excluded_paths: Arc::new(excluded_paths),
            allow_ip_override: config.allow_ip_override,
            redirect_status,
        })
    }
}

pub async fn geo_routing_middleware(
    State(state): State<GeoRoutingState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = req.method().to_string();

    // 1. Select the IP to geolocate by.
    let ip = client_ip(&req, state.allow_ip_override);

    // 2. Resolve the country; any miss degrades to the Unknown sentinel.
    let country = ip
        .and_then(|ip| state.resolver.lookup(ip))
        .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
    metrics::record_lookup(if country == UNKNOWN_COUNTRY {
        "unknown"
    } else {
        "resolved"
    });

    // 3. Forward or redirect.
    let decision = decide(
        &state.domains,
        &state.excluded_paths,
        &country,
        RequestFacts {
            host: host_with_port(&req),
            path: req.uri().path(),
            query: req.uri().query(),
        },
    );

    match decision {
        RoutingDecision::Forward { country } => {
            tracing::debug!(
                country = %country,
                path = %req.uri().path(),
                "Forwarding to application handler"
            );
            annotate(&mut req, country);
            let response = next.run(req).await;
            metrics::record_request(&method, response.status().as_u16(), "forward", start_time);
            response
        }
        RoutingDecision::Redirect { location } => {
            tracing::debug!(
                country = %country,
                location = %location,
                "Host is not canonical for country, redirecting"
            );
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    metrics::record_redirect(&country);
                    let mut response = state.redirect_status.into_response();
                    response.headers_mut().insert(header::LOCATION, value);
                    metrics::record_request(&method, response.status().as_u16(), "redirect", start_time);
                    response
                }
                Err(_) => {
                    // An unusable Location must not turn into a 5xx from this
                    // layer; forwarding is the safe degradation.
                    tracing::error!(
                        location = %location,
                        "Redirect target is not a valid header value, forwarding instead"
                    );
                    annotate(&mut req, country);
                    let response = next.run(req).await;
                    metrics::record_request(&method, response.status().as_u16(), "forward", start_time);
                    response
                }
            }
        }
    }
}

/// Attach the resolved country to the request, as a header for downstream
/// services and as an extension for in-process handlers. Always present on
/// forwarded requests, including when the country is Unknown.
fn annotate(req: &mut Request<Body>, country: String) {
    match HeaderValue::from_str(&country) {
        Ok(value) => {
            req.headers_mut().insert(X_GEOIP_COUNTRY.clone(), value);
        }
        Err(_) => {
            tracing::warn!(country = %country, "Country name is not a valid header value");
        }
    }
    req.extensions_mut().insert(ResolvedCountry(country));
}

/// Host header as the client sent it, with port if present. Falls back to the
/// URI authority for HTTP/2 requests.
fn host_with_port<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|authority| authority.as_str()))
}
