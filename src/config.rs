use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::catalog::{PokeApiCatalog, DEFAULT_API_BASE};
use crate::error::Result;
use crate::store::CollectionStore;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Explore location areas, catch Pokemon and keep a pokedex")]
pub struct Args {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Tracing filter, e.g. `info` or `pokedex=debug`. `RUST_LOG` wins.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Serve the JSON API for the web client
    Serve(ServeArgs),
    /// Interactive command shell
    Repl,
}

#[derive(ClapArgs, Debug, PartialEq)]
pub struct CatalogArgs {
    /// PokeAPI base URL
    #[arg(long, env = "POKEDEX_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Network timeout for catalog requests
    #[arg(long, env = "POKEDEX_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Response cache directory
    #[arg(long, env = "POKEDEX_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Always go to the network
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl CatalogArgs {
    pub fn cache_root(&self) -> Option<PathBuf> {
        if self.no_cache {
            return None;
        }
        Some(
            self.cache_dir
                .clone()
                .unwrap_or_else(PokeApiCatalog::default_cache_root),
        )
    }

    pub fn build(&self) -> Result<PokeApiCatalog> {
        PokeApiCatalog::new(
            &self.api_base,
            Duration::from_secs(self.timeout_secs),
            self.cache_root(),
        )
    }
}

#[derive(ClapArgs, Debug, PartialEq)]
pub struct StoreArgs {
    /// Pokedex file
    #[arg(long = "store", env = "POKEDEX_STORE", global = true)]
    pub path: Option<PathBuf>,

    /// Keep the pokedex in memory only
    #[arg(long, global = true, conflicts_with = "path")]
    pub memory: bool,
}

impl StoreArgs {
    pub async fn open(&self) -> Result<CollectionStore> {
        if self.memory {
            return Ok(CollectionStore::in_memory());
        }
        let path = self
            .path
            .clone()
            .unwrap_or_else(CollectionStore::default_path);
        CollectionStore::open(path).await
    }
}

#[derive(ClapArgs, Debug, PartialEq)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, env = "POKEDEX_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// URL to ping periodically so a hosted instance stays awake
    #[arg(long, env = "POKEDEX_KEEPALIVE_URL")]
    pub keepalive_url: Option<String>,

    #[arg(long, default_value_t = 14)]
    pub keepalive_mins: u64,
}
