use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::catalog::Catalog;
use crate::creature::{Creature, CreatureStat, LocationArea, LocationPage, LocationSummary};
use crate::cursor::PageToken;
use crate::error::{PokedexError, Result};

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct LocationListResponse {
    count: u32,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct LocationAreaResponse {
    name: String,
    #[serde(default)]
    pokemon_encounters: Vec<EncounterSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct EncounterSlot {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    height: u16,
    #[serde(default)]
    weight: u16,
    base_experience: Option<i32>,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

/// Catalog backed by PokeAPI over HTTP, with an optional on-disk response
/// cache keyed by request URL.
pub struct PokeApiCatalog {
    client: reqwest::Client,
    api_base: String,
    cache_root: Option<PathBuf>,
}

impl PokeApiCatalog {
    pub fn new(api_base: &str, timeout: Duration, cache_root: Option<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PokedexError::upstream(err.to_string()))?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            cache_root,
        })
    }

    pub fn default_cache_root() -> PathBuf {
        let base = dirs_next::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("pokedex")
    }

    async fn fetch_json_cached<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        missing: &str,
    ) -> Result<T> {
        let bytes = self.fetch_bytes_cached(url, missing).await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                if let Some(path) = self.cache_path(url) {
                    let _ = fs::remove_file(&path).await;
                }
                Err(PokedexError::upstream(format!("malformed response: {err}")))
            }
        }
    }

    async fn fetch_bytes_cached(&self, url: &str, missing: &str) -> Result<Vec<u8>> {
        let cache_path = self.cache_path(url);
        if let Some(path) = &cache_path {
            if let Some(bytes) = read_cache(path).await {
                tracing::debug!(url, "catalog cache hit");
                return Ok(bytes);
            }
        }

        tracing::debug!(url, "catalog fetch");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| PokedexError::upstream(err.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PokedexError::not_found(missing));
        }
        let response = response
            .error_for_status()
            .map_err(|err| PokedexError::upstream(err.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| PokedexError::upstream(err.to_string()))?
            .to_vec();
        if let Some(path) = &cache_path {
            write_cache(path, &bytes).await;
        }
        Ok(bytes)
    }

    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        let root = self.cache_root.as_ref()?;
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let digest = hex::encode(hasher.finalize());
        Some(root.join("http").join(digest))
    }
}

#[async_trait]
impl Catalog for PokeApiCatalog {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn list_locations(&self, token: &PageToken) -> Result<LocationPage> {
        let response: LocationListResponse = self
            .fetch_json_cached(token.as_str(), "Location page not found")
            .await?;
        Ok(LocationPage {
            locations: response
                .results
                .into_iter()
                .map(|entry| LocationSummary {
                    name: entry.name,
                    url: entry.url,
                })
                .collect(),
            next: response.next.map(PageToken::new),
            previous: response.previous.map(PageToken::new),
            count: response.count,
        })
    }

    async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{name}", self.api_base);
        let response: LocationAreaResponse =
            self.fetch_json_cached(&url, "Location not found").await?;
        Ok(LocationArea {
            name: response.name,
            encounters: response
                .pokemon_encounters
                .into_iter()
                .map(|slot| slot.pokemon.name)
                .collect(),
        })
    }

    async fn pokemon(&self, name: &str) -> Result<Creature> {
        let url = format!("{}/pokemon/{name}", self.api_base);
        let response: PokemonResponse = self.fetch_json_cached(&url, "Pokemon not found").await?;
        Ok(Creature {
            name: response.name,
            id: response.id,
            height: response.height,
            weight: response.weight,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            stats: response
                .stats
                .into_iter()
                .map(|slot| CreatureStat {
                    name: slot.stat.name,
                    base_value: slot.base_stat,
                })
                .collect(),
            sprite_url: pointer_string(&response.sprites, "/front_default"),
            base_experience: response.base_experience.unwrap_or(0),
            flavor_text: None,
        })
    }

    async fn flavor_text(&self, species_id: u32) -> Result<Option<String>> {
        let url = format!("{}/pokemon-species/{species_id}", self.api_base);
        let response: SpeciesResponse = self.fetch_json_cached(&url, "Species not found").await?;
        Ok(response
            .flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| sanitize_text(&entry.flavor_text)))
    }
}

fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent).await {
            tracing::debug!(path = %parent.display(), %err, "catalog cache directory not created");
            return;
        }
    }
    if let Err(err) = fs::write(path, bytes).await {
        tracing::debug!(path = %path.display(), %err, "catalog cache write skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pokemon_response_tolerates_missing_optional_fields() {
        let body = serde_json::json!({
            "id": 16,
            "name": "pidgey",
            "base_experience": null,
        });
        let response: PokemonResponse = serde_json::from_value(body).unwrap();
        assert!(response.types.is_empty());
        assert_eq!(pointer_string(&response.sprites, "/front_default"), None);
        assert_eq!(response.base_experience, None);
    }

    #[test]
    fn flavor_text_is_flattened() {
        assert_eq!(
            sanitize_text("A common sight\nin forests\u{000C}and woods."),
            "A common sight in forests and woods."
        );
    }

    #[test]
    fn cache_paths_are_keyed_by_url() {
        let catalog = PokeApiCatalog::new(
            "https://pokeapi.co/api/v2/",
            Duration::from_secs(1),
            Some(PathBuf::from("/tmp/pokedex-cache")),
        )
        .unwrap();
        assert_eq!(catalog.api_base(), "https://pokeapi.co/api/v2");
        let a = catalog.cache_path("https://pokeapi.co/api/v2/pokemon/pidgey");
        let b = catalog.cache_path("https://pokeapi.co/api/v2/pokemon/rattata");
        assert_ne!(a, b);
        assert!(a.unwrap().starts_with("/tmp/pokedex-cache/http"));

        let uncached =
            PokeApiCatalog::new("https://pokeapi.co/api/v2", Duration::from_secs(1), None).unwrap();
        assert_eq!(uncached.cache_path("https://pokeapi.co/api/v2/pokemon/pidgey"), None);
    }

    #[tokio::test]
    async fn cache_writes_create_directories_and_skip_when_they_cannot() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("http").join("abc.bin");
        write_cache(&nested, b"{}").await;
        assert_eq!(std::fs::read(&nested).unwrap(), b"{}");

        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let under_file = blocker.join("http").join("abc.bin");
        write_cache(&under_file, b"{}").await;
        assert!(!under_file.exists());
    }
}
