//! Country resolution contract.

use std::net::IpAddr;

/// Sentinel country name used when geolocation is unavailable for a request.
///
/// Downstream handlers can compare the `X-GeoIP-Country` header (or the
/// [`ResolvedCountry`] extension) against this value to detect that lookup
/// failed and degrade gracefully.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Maps a client IP address to a country display name.
///
/// Implementations must be safe for concurrent lookups and must not block
/// indefinitely; the router calls `lookup` synchronously on the request path.
/// A lookup that cannot attribute the address to a country returns `None`,
/// never an error.
pub trait CountryResolver: Send + Sync {
    /// Resolve an IP address to a country display name (e.g. "Mexico").
    fn lookup(&self, ip: IpAddr) -> Option<String>;
}

/// Request extension carrying the country resolved for the request.
///
/// Attached to every forwarded request, including when resolution failed
/// (in which case it holds [`UNKNOWN_COUNTRY`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCountry(pub String);

impl ResolvedCountry {
    /// True when geolocation was unavailable for this request.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_COUNTRY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sentinel_detection() {
        assert!(ResolvedCountry(UNKNOWN_COUNTRY.to_string()).is_unknown());
        assert!(!ResolvedCountry("Mexico".to_string()).is_unknown());
    }
}
