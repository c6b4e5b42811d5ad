#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pokedex::app::AppState;
use pokedex::catalog::Catalog;
use pokedex::catch::RollSource;
use pokedex::creature::{Creature, CreatureStat, LocationArea, LocationPage, LocationSummary};
use pokedex::cursor::{PageToken, PAGE_SIZE};
use pokedex::error::{PokedexError, Result};
use pokedex::store::CollectionStore;

pub const API_BASE: &str = "https://catalog.test/api/v2";

/// In-memory catalog with the provider's paging behaviour.
#[derive(Default)]
pub struct StaticCatalog {
    pub locations: Vec<String>,
    pub areas: HashMap<String, Vec<String>>,
    pub pokemon: HashMap<String, Creature>,
    pub flavor: HashMap<u32, String>,
    pub broken: HashSet<String>,
    pub down: bool,
    pub requests: Mutex<Vec<String>>,
}

impl StaticCatalog {
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn check_up(&self) -> Result<()> {
        if self.down {
            return Err(PokedexError::upstream("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    fn api_base(&self) -> &str {
        API_BASE
    }

    async fn list_locations(&self, token: &PageToken) -> Result<LocationPage> {
        self.check_up()?;
        self.requests.lock().unwrap().push(token.to_string());
        let offset = token
            .offset()
            .ok_or_else(|| PokedexError::upstream("bad page token"))? as usize;
        let total = self.locations.len();
        let end = (offset + PAGE_SIZE as usize).min(total);
        let locations = self
            .locations
            .get(offset.min(total)..end)
            .unwrap_or_default()
            .iter()
            .map(|name| LocationSummary {
                name: name.clone(),
                url: format!("{API_BASE}/location-area/{name}/"),
            })
            .collect();
        let next = (end < total).then(|| PageToken::at_offset(API_BASE, end as u32));
        let previous = (offset > 0).then(|| {
            PageToken::at_offset(API_BASE, offset.saturating_sub(PAGE_SIZE as usize) as u32)
        });
        Ok(LocationPage {
            locations,
            next,
            previous,
            count: total as u32,
        })
    }

    async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.check_up()?;
        let encounters = self
            .areas
            .get(name)
            .ok_or_else(|| PokedexError::not_found("Location not found"))?;
        Ok(LocationArea {
            name: name.to_string(),
            encounters: encounters.clone(),
        })
    }

    async fn pokemon(&self, name: &str) -> Result<Creature> {
        self.check_up()?;
        if self.broken.contains(name) {
            return Err(PokedexError::upstream("malformed response"));
        }
        self.pokemon
            .get(name)
            .cloned()
            .ok_or_else(|| PokedexError::not_found("Pokemon not found"))
    }

    async fn flavor_text(&self, species_id: u32) -> Result<Option<String>> {
        self.check_up()?;
        Ok(self.flavor.get(&species_id).cloned())
    }
}

/// Always draws the same roll.
pub struct FixedRoll(pub u32);

impl RollSource for FixedRoll {
    fn draw(&self, _upper: u32) -> u32 {
        self.0
    }
}

pub fn creature(name: &str, id: u32, base_experience: i32, types: &[&str]) -> Creature {
    Creature {
        name: name.to_string(),
        id,
        height: 3,
        weight: 18,
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: vec![
            CreatureStat {
                name: "hp".to_string(),
                base_value: 40,
            },
            CreatureStat {
                name: "speed".to_string(),
                base_value: 56,
            },
        ],
        sprite_url: Some(format!("https://sprites.test/{id}.png")),
        base_experience,
        flavor_text: None,
    }
}

/// 45 locations (three pages), a few areas and the Pokemon living there.
pub fn kanto() -> StaticCatalog {
    let mut catalog = StaticCatalog {
        locations: (0..45).map(|i| format!("location-{i}")).collect(),
        ..StaticCatalog::default()
    };
    for c in [
        creature("pidgey", 16, 50, &["normal", "flying"]),
        creature("rattata", 19, 51, &["normal"]),
        creature("caterpie", 10, 39, &["bug"]),
        creature("missingno", 0, 0, &[]),
    ] {
        catalog.pokemon.insert(c.name.clone(), c);
    }
    catalog.areas.insert(
        "viridian-forest-area".to_string(),
        vec!["caterpie".to_string(), "pidgey".to_string()],
    );
    catalog.areas.insert(
        "route-1-area".to_string(),
        vec!["pidgey".to_string(), "rattata".to_string()],
    );
    catalog.areas.insert(
        "glitch-city-area".to_string(),
        vec!["missingno".to_string(), "bulbasaur".to_string(), "glitchmon".to_string()],
    );
    catalog.broken.insert("glitchmon".to_string());
    catalog.flavor.insert(
        16,
        "A common sight in forests and woods.".to_string(),
    );
    catalog
}

pub fn state(catalog: StaticCatalog, roll: u32) -> (AppState, Arc<StaticCatalog>) {
    let catalog = Arc::new(catalog);
    let state = AppState {
        catalog: catalog.clone(),
        store: Arc::new(CollectionStore::in_memory()),
        rolls: Arc::new(FixedRoll(roll)),
    };
    (state, catalog)
}
