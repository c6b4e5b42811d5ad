use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::catalog::{normalize_name, Catalog};
use crate::creature::Creature;
use crate::element;
use crate::error::{PokedexError, Result};
use crate::store::CollectionStore;

const EXPLORE_CONCURRENCY: usize = 6;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EncounteredPokemon {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub sprite_url: Option<String>,
    pub types: Vec<String>,
    pub type_badges: Vec<&'static str>,
    pub caught: bool,
}

impl EncounteredPokemon {
    fn from_detail(creature: Creature, caught: bool) -> Self {
        Self {
            type_badges: element::badges(&creature.types),
            name: creature.name,
            id: Some(creature.id),
            sprite_url: creature.sprite_url,
            types: creature.types,
            caught,
        }
    }

    fn name_only(name: String, caught: bool) -> Self {
        Self {
            name,
            id: None,
            sprite_url: None,
            types: Vec::new(),
            type_badges: Vec::new(),
            caught,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Exploration {
    pub name: String,
    #[serde(rename = "pokemon")]
    pub creatures: Vec<EncounteredPokemon>,
}

/// Lists the Pokemon found in a location area, each marked with whether it
/// is already in the pokedex. A Pokemon whose details cannot be loaded is
/// still listed by name.
pub async fn explore(
    catalog: Arc<dyn Catalog>,
    store: &CollectionStore,
    location: &str,
) -> Result<Exploration> {
    let location = normalize_name(location)?;
    let area = catalog.location_area(&location).await?;
    let details = fetch_details(catalog, &area.encounters).await;

    let mut creatures = Vec::with_capacity(area.encounters.len());
    for (name, detail) in area.encounters.into_iter().zip(details) {
        let entry = match detail {
            Ok(creature) => {
                let caught = store.contains(&creature.name).await;
                EncounteredPokemon::from_detail(creature, caught)
            }
            Err(err) => {
                tracing::warn!(pokemon = %name, %err, "listing pokemon without details");
                let caught = store.contains(&name).await;
                EncounteredPokemon::name_only(name, caught)
            }
        };
        creatures.push(entry);
    }

    tracing::debug!(location = %area.name, count = creatures.len(), "explored");
    Ok(Exploration {
        name: area.name,
        creatures,
    })
}

/// Loads creature details with bounded concurrency, returning results in
/// the same order as `names`.
async fn fetch_details(catalog: Arc<dyn Catalog>, names: &[String]) -> Vec<Result<Creature>> {
    let semaphore = Arc::new(Semaphore::new(EXPLORE_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for (index, name) in names.iter().enumerate() {
        let name = name.clone();
        let catalog = catalog.clone();
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => catalog.pokemon(&name).await,
                Err(_) => Err(PokedexError::upstream("explore semaphore closed")),
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<Creature>>> = names.iter().map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(err) => tracing::warn!(%err, "pokemon detail task failed"),
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(PokedexError::upstream("detail lookup aborted"))))
        .collect()
}
