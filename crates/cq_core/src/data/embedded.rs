//! Embedded country catalog.
//!
//! The default dataset is compiled into the binary with `include_str!` and
//! parsed once on first access, so a game can start without any file or
//! network I/O.

use std::sync::OnceLock;

use crate::data::provider::{CountryProvider, ProviderError};
use crate::models::Country;

/// Country catalog JSON (~5KB)
pub const COUNTRIES_JSON: &str = include_str!("../../../../data/countries.json");

static CATALOG: OnceLock<Vec<Country>> = OnceLock::new();

/// Parsed embedded catalog, cached for the process lifetime. A parse failure
/// degrades to an empty catalog, which surfaces as a setup failure at game
/// start rather than a panic.
pub fn catalog() -> &'static [Country] {
    CATALOG.get_or_init(|| match serde_json::from_str(COUNTRIES_JSON) {
        Ok(countries) => countries,
        Err(err) => {
            log::error!("Embedded country catalog failed to parse: {}", err);
            Vec::new()
        }
    })
}

/// Provider backed by the embedded catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CountryProvider for EmbeddedCatalog {
    fn fetch(&self) -> Result<Vec<Country>, ProviderError> {
        let countries = catalog();
        if countries.is_empty() {
            return Err(ProviderError::Malformed("embedded catalog is empty".to_string()));
        }
        Ok(countries.to_vec())
    }
}
