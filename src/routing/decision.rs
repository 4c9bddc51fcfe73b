//! Forward-or-redirect decision logic.
//!
//! # Responsibilities
//! - Compare the request host against the canonical domain for the country
//! - Honor excluded paths regardless of host mismatch
//! - Build redirect targets that land on the equivalent resource
//!
//! # Design Decisions
//! - Pure function of (domain map, excluded paths, country, request facts);
//!   deterministic and side-effect-free
//! - Exact host-with-port comparison, case-insensitive for the host part
//! - A request without a Host header can never be "on the correct domain"
//!   and is redirected
//! - The Location preserves path and query so the redirect is transparent

use std::collections::HashSet;

use crate::routing::domains::DomainMap;

/// The facts about a request that routing looks at.
#[derive(Debug, Clone, Copy)]
pub struct RequestFacts<'a> {
    /// Host header value, with port if the client sent one.
    pub host: Option<&'a str>,
    /// Request path, always starting with '/'.
    pub path: &'a str,
    /// Raw query string, without the leading '?'.
    pub query: Option<&'a str>,
}

/// Outcome of routing a single request. Created and discarded per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Pass through to the inner handler, annotated with the country.
    Forward { country: String },
    /// Answer with a redirect to the canonical domain.
    Redirect { location: String },
}

/// Decide whether a request stays on its current domain or is redirected.
pub fn decide(
    domains: &DomainMap,
    excluded_paths: &HashSet<String>,
    country: &str,
    facts: RequestFacts<'_>,
) -> RoutingDecision {
    let canonical = domains.get_domain(country);

    let on_canonical_domain = facts
        .host
        .map(|host| host_matches(host, canonical))
        .unwrap_or(false);

    if on_canonical_domain || excluded_paths.contains(facts.path) {
        RoutingDecision::Forward {
            country: country.to_string(),
        }
    } else {
        RoutingDecision::Redirect {
            location: redirect_location(canonical, facts.path, facts.query),
        }
    }
}

/// Exact host-with-port comparison against the canonical domain.
///
/// A scheme on the canonical domain only affects the redirect target, not
/// the comparison.
fn host_matches(host: &str, canonical: &str) -> bool {
    host.eq_ignore_ascii_case(strip_scheme(canonical))
}

/// Build the redirect Location: scheme, canonical domain, original path and
/// query. Defaults to `http://` when the domain does not carry a scheme.
pub fn redirect_location(canonical: &str, path: &str, query: Option<&str>) -> String {
    let mut location = if canonical.contains("://") {
        canonical.to_string()
    } else {
        format!("http://{canonical}")
    };

    location.push_str(path);
    if let Some(query) = query {
        if !query.is_empty() {
            location.push('?');
            location.push_str(query);
        }
    }
    location
}

fn strip_scheme(domain: &str) -> &str {
    match domain.find("://") {
        Some(idx) => &domain[idx + 3..],
        None => domain,
    }
}
