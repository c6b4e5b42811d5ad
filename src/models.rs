use serde::{Deserialize, Serialize};

use crate::creature::{Creature, LocationSummary};
use crate::cursor::PageToken;
use crate::element;

#[derive(Debug, Default, Deserialize)]
pub struct LocationsQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationSummary>,
    pub next: PageToken,
    pub previous: PageToken,
    pub provider_next: Option<PageToken>,
    pub provider_previous: Option<PageToken>,
    pub count: u32,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Serialize)]
pub struct PokedexEntry {
    pub name: String,
    pub id: u32,
    pub height: u16,
    pub weight: u16,
    pub types: Vec<String>,
    pub type_badges: Vec<&'static str>,
    pub sprite_url: Option<String>,
}

impl From<Creature> for PokedexEntry {
    fn from(creature: Creature) -> Self {
        Self {
            type_badges: element::badges(&creature.types),
            name: creature.name,
            id: creature.id,
            height: creature.height,
            weight: creature.weight,
            types: creature.types,
            sprite_url: creature.sprite_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PokedexResponse {
    pub pokemon: Vec<PokedexEntry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct PokemonDetail {
    #[serde(flatten)]
    pub creature: Creature,
    pub type_badges: Vec<&'static str>,
}
