//! The user's pokedex: Pokemon caught so far, keyed by name, in catch order.
//!
//! A store is either purely in memory or backed by a JSON file. Every
//! mutation runs under one lock and, for the file backend, is written to
//! disk before it becomes visible, so a failed write leaves both the file
//! and the in-memory view as they were.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::creature::Creature;
use crate::error::{PokedexError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionFile {
    pokemon: Vec<Creature>,
}

pub struct CollectionStore {
    caught: Mutex<Vec<Creature>>,
    path: Option<PathBuf>,
}

impl CollectionStore {
    pub fn in_memory() -> Self {
        Self {
            caught: Mutex::new(Vec::new()),
            path: None,
        }
    }

    /// Opens a file-backed store. A missing file is an empty pokedex.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let caught = match tokio::fs::read_to_string(&path).await {
            Ok(json) => {
                let file: CollectionFile = serde_json::from_str(&json)
                    .map_err(|e| PokedexError::storage(format!("Pokedex file corrupted: {}", e)))?;
                dedup_by_name(file.pokemon)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(PokedexError::storage(format!(
                    "Failed to read pokedex file: {}",
                    e
                )))
            }
        };
        tracing::info!(path = %path.display(), count = caught.len(), "pokedex loaded");
        Ok(Self {
            caught: Mutex::new(caught),
            path: Some(path),
        })
    }

    pub fn default_path() -> PathBuf {
        let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("pokedex").join("pokedex.json")
    }

    /// Records a catch. Adding a name that is already present changes
    /// nothing; returns whether the Pokemon was newly added.
    pub async fn add(&self, creature: Creature) -> Result<bool> {
        let mut caught = self.caught.lock().await;
        if caught.iter().any(|entry| entry.name == creature.name) {
            return Ok(false);
        }
        let mut next = caught.clone();
        next.push(creature);
        self.persist(&next).await?;
        *caught = next;
        Ok(true)
    }

    pub async fn remove(&self, name: &str) -> Result<Creature> {
        let mut caught = self.caught.lock().await;
        let index = caught
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| PokedexError::not_found("Pokemon not found in pokedex"))?;
        let mut next = caught.clone();
        let removed = next.remove(index);
        self.persist(&next).await?;
        *caught = next;
        Ok(removed)
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.caught
            .lock()
            .await
            .iter()
            .any(|entry| entry.name == name)
    }

    pub async fn get(&self, name: &str) -> Result<Creature> {
        self.caught
            .lock()
            .await
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
            .ok_or_else(|| PokedexError::not_found("Pokemon not caught yet"))
    }

    pub async fn list_all(&self) -> Vec<Creature> {
        self.caught.lock().await.clone()
    }

    async fn persist(&self, caught: &[Creature]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = CollectionFile {
            pokemon: caught.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| PokedexError::storage(format!("Failed to serialize pokedex: {}", e)))?;
        write_atomic(path, json.as_bytes()).await?;
        tracing::debug!(path = %path.display(), count = caught.len(), "pokedex saved");
        Ok(())
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PokedexError::storage(format!("Failed to create pokedex directory: {}", e)))?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| PokedexError::storage(format!("Failed to write pokedex file: {}", e)))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| PokedexError::storage(format!("Failed to replace pokedex file: {}", e)))?;
    Ok(())
}

fn dedup_by_name(entries: Vec<Creature>) -> Vec<Creature> {
    let mut unique: Vec<Creature> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !unique.iter().any(|seen| seen.name == entry.name) {
            unique.push(entry);
        }
    }
    unique
}
