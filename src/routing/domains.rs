//! Canonical domain lookup.
//!
//! # Responsibilities
//! - Store the country → canonical domain mapping
//! - Guarantee a total `get_domain`: every country resolves to *some* domain
//!
//! # Design Decisions
//! - The fallback entry is pulled out at construction; its absence is a
//!   construction error, so lookup never fails at request time
//! - Country keys are matched exactly (display names as the resolver
//!   produces them)

use std::collections::HashMap;

use crate::config::schema::FALLBACK_DOMAIN_KEY;

/// Construction error: the mapping has no fallback entry.
#[derive(Debug, thiserror::Error)]
#[error("domain map has no \"{FALLBACK_DOMAIN_KEY}\" fallback entry")]
pub struct MissingFallbackDomain;

/// Immutable country → canonical domain mapping with a guaranteed fallback.
#[derive(Debug, Clone)]
pub struct DomainMap {
    by_country: HashMap<String, String>,
    fallback: String,
}

impl DomainMap {
    /// Build a domain map from a configured mapping.
    ///
    /// The mapping must contain the `default` key; the entry is removed from
    /// the per-country table and kept as the fallback.
    pub fn new(mut domains: HashMap<String, String>) -> Result<Self, MissingFallbackDomain> {
        let fallback = domains
            .remove(FALLBACK_DOMAIN_KEY)
            .ok_or(MissingFallbackDomain)?;

        Ok(Self {
            by_country: domains,
            fallback,
        })
    }

    /// Canonical domain for a country. Total: unmapped countries (including
    /// the Unknown sentinel) get the fallback domain.
    pub fn get_domain(&self, country: &str) -> &str {
        self.by_country
            .get(country)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    /// The configured fallback domain.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}
