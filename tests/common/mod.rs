//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::IpAddr;

use geo_router::CountryResolver;

/// Resolver backed by a fixed table; no geolocation database needed in tests.
pub struct TableResolver {
    table: HashMap<IpAddr, String>,
}

impl TableResolver {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let table = entries
            .iter()
            .map(|(ip, country)| (ip.parse().unwrap(), country.to_string()))
            .collect();
        Self { table }
    }
}

impl CountryResolver for TableResolver {
    fn lookup(&self, ip: IpAddr) -> Option<String> {
        self.table.get(&ip).cloned()
    }
}
