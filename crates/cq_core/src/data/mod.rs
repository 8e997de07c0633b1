//! Country data.
//!
//! The catalog is queried exactly once per game start through the
//! [`CountryProvider`] boundary, then filtered down to quizzable entries.

pub mod embedded;
pub mod provider;

pub use embedded::{catalog, EmbeddedCatalog, COUNTRIES_JSON};
pub use provider::{CountryProvider, ProviderError};

use std::collections::HashSet;

use crate::models::{Country, GameConfig};

/// Filter a raw catalog down to countries that can be quizzed: at least one
/// capital, a flag image, sovereign, a known region, and a region matching
/// the configured filter. Duplicate names are dropped; a country appears in
/// a game's pool at most once.
pub fn eligible_countries(raw: Vec<Country>, config: &GameConfig) -> Vec<Country> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|c| {
            !c.capitals.is_empty()
                && !c.flag.is_empty()
                && c.independent
                && !c.region.is_empty()
                && config.region_matches(&c.region)
        })
        .filter(|c| seen.insert(c.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, region: &str, independent: bool) -> Country {
        Country {
            name: name.to_string(),
            capitals: vec![format!("{} City", name)],
            flag: format!("https://flags.test/{}.png", name),
            region: region.to_string(),
            independent,
        }
    }

    #[test]
    fn test_filter_excludes_dependent_territories() {
        let raw = vec![country("France", "Europe", true), country("Greenland", "Americas", false)];
        let config = GameConfig { player_name: "Ada".into(), ..GameConfig::default() };

        let pool = eligible_countries(raw, &config);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].name, "France");
    }

    #[test]
    fn test_filter_excludes_missing_capital_or_flag() {
        let mut no_capital = country("Atlantis", "Europe", true);
        no_capital.capitals.clear();
        let mut no_flag = country("Lemuria", "Europe", true);
        no_flag.flag.clear();

        let config = GameConfig { player_name: "Ada".into(), ..GameConfig::default() };
        assert!(eligible_countries(vec![no_capital, no_flag], &config).is_empty());
    }

    #[test]
    fn test_filter_drops_duplicate_names() {
        let raw = vec![country("France", "Europe", true), country("France", "Europe", true)];
        let config = GameConfig { player_name: "Ada".into(), ..GameConfig::default() };
        assert_eq!(eligible_countries(raw, &config).len(), 1);
    }

    #[test]
    fn test_filter_applies_region() {
        let raw = vec![
            country("France", "Europe", true),
            country("Japan", "Asia", true),
            country("Kenya", "Africa", true),
        ];
        let config = GameConfig {
            player_name: "Ada".into(),
            region: "asia".to_string(),
            ..GameConfig::default()
        };

        let pool = eligible_countries(raw, &config);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].name, "Japan");
    }
}
