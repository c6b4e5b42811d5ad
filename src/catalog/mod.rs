mod pokeapi;

use async_trait::async_trait;

use crate::creature::{Creature, LocationArea, LocationPage};
use crate::cursor::PageToken;
use crate::error::{PokedexError, Result};

pub use pokeapi::PokeApiCatalog;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Read-only view of the upstream Pokemon data provider.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Base URL the provider's page tokens are rooted at.
    fn api_base(&self) -> &str;

    async fn list_locations(&self, token: &PageToken) -> Result<LocationPage>;

    async fn location_area(&self, name: &str) -> Result<LocationArea>;

    async fn pokemon(&self, name: &str) -> Result<Creature>;

    /// English flavor text for a species, if the provider has one.
    async fn flavor_text(&self, species_id: u32) -> Result<Option<String>>;
}

/// Lower-cases and checks a Pokemon or location name before it is put in a
/// provider URL.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.trim().to_ascii_lowercase();
    if name.is_empty() {
        return Err(PokedexError::validation("name must not be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(PokedexError::validation(format!("invalid name: {raw}")));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_name("  Pidgey ").unwrap(), "pidgey");
        assert_eq!(
            normalize_name("canalave-city-area").unwrap(),
            "canalave-city-area"
        );
    }

    #[test]
    fn normalize_rejects_empty_and_path_characters() {
        assert!(matches!(normalize_name("  "), Err(PokedexError::Validation(_))));
        assert!(matches!(
            normalize_name("../pokemon"),
            Err(PokedexError::Validation(_))
        ));
        assert!(matches!(
            normalize_name("mr mime"),
            Err(PokedexError::Validation(_))
        ));
    }
}
