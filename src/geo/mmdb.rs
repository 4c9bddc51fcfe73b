//! MaxMind MMDB-backed country resolver.
//!
//! Works with the free GeoLite2-Country database (GeoLite2-City also carries
//! the country record and is accepted).

use std::net::IpAddr;
use std::path::Path;

use maxminddb::geoip2;

use crate::geo::resolver::CountryResolver;

/// Error opening the geolocation database at startup.
#[derive(Debug, thiserror::Error)]
#[error("failed to open geolocation database {path}: {source}")]
pub struct GeoDbError {
    pub path: String,
    #[source]
    pub source: maxminddb::MaxMindDBError,
}

/// Country resolver backed by a memory-loaded MaxMind database.
///
/// The reader is immutable after open and safe to share across request tasks.
pub struct MmdbResolver {
    reader: maxminddb::Reader<Vec<u8>>,
}

impl MmdbResolver {
    /// Open an MMDB file, loading it fully into memory.
    pub fn open(path: &Path) -> Result<Self, GeoDbError> {
        let reader = maxminddb::Reader::open_readfile(path).map_err(|source| GeoDbError {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Geolocation database loaded");
        Ok(Self { reader })
    }
}

impl CountryResolver for MmdbResolver {
    fn lookup(&self, ip: IpAddr) -> Option<String> {
        let record: geoip2::Country = self.reader.lookup(ip).ok()?;
        let country = record.country?;

        // Prefer the English display name to match the header contract
        // ("United Kingdom", "Mexico"); fall back to the ISO code.
        country
            .names
            .as_ref()
            .and_then(|names| names.get("en"))
            .map(|name| name.to_string())
            .or_else(|| country.iso_code.map(|code| code.to_string()))
    }
}
