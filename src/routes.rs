use axum::Router;
use axum::routing::{get, post};

use crate::app::AppState;
use crate::handlers::locations::{explore_location, list_locations};
use crate::handlers::pokemon::{catch_pokemon, get_pokemon, list_pokedex, release_pokemon};

pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list_locations))
        .route("/locations/{area}", get(explore_location))
}

pub fn pokemon_routes() -> Router<AppState> {
    Router::new()
        .route("/pokemon/{name}/catch", post(catch_pokemon))
        .route("/pokemon/{name}", get(get_pokemon).delete(release_pokemon))
        .route("/pokedex", get(list_pokedex))
}
