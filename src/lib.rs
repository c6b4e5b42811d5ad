//! Pokedex companion service.
//!
//! Browses PokeAPI location areas, simulates catch attempts and keeps the
//! user's pokedex, exposed as a JSON API and an interactive shell.

pub mod app;
pub mod catalog;
pub mod catch;
pub mod config;
pub mod creature;
pub mod cursor;
pub mod element;
pub mod error;
pub mod handlers;
pub mod keepalive;
pub mod models;
pub mod repl;
pub mod routes;
pub mod session;
pub mod store;
