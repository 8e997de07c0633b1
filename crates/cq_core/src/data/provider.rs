use thiserror::Error;

use crate::models::Country;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Country data unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed country data: {0}")]
    Malformed(String),
}

/// External country-data boundary. Implementations are queried once per game
/// start; the engine never holds on to a provider after pool construction.
pub trait CountryProvider {
    fn fetch(&self) -> Result<Vec<Country>, ProviderError>;
}
