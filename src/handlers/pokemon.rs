use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::app::AppState;
use crate::catalog::normalize_name;
use crate::catch::{self, CatchAttempt};
use crate::element;
use crate::error::Result;
use crate::models::{PokedexEntry, PokedexResponse, PokemonDetail};

pub async fn catch_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CatchAttempt>> {
    let attempt = catch::attempt_catch(
        state.catalog.as_ref(),
        &state.store,
        state.rolls.as_ref(),
        &name,
    )
    .await?;
    Ok(Json(attempt))
}

pub async fn list_pokedex(State(state): State<AppState>) -> Json<PokedexResponse> {
    let pokemon: Vec<PokedexEntry> = state
        .store
        .list_all()
        .await
        .into_iter()
        .map(PokedexEntry::from)
        .collect();
    Json(PokedexResponse {
        count: pokemon.len(),
        pokemon,
    })
}

pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PokemonDetail>> {
    let name = normalize_name(&name)?;
    let mut creature = state.store.get(&name).await?;

    match state.catalog.flavor_text(creature.id).await {
        Ok(text) => creature.flavor_text = text,
        Err(err) => tracing::warn!(pokemon = %name, %err, "flavor text unavailable"),
    }

    Ok(Json(PokemonDetail {
        type_badges: element::badges(&creature.types),
        creature,
    }))
}

pub async fn release_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode> {
    let name = normalize_name(&name)?;
    let released = state.store.remove(&name).await?;
    tracing::info!(pokemon = %released.name, "{} was released into the wild!", released.name);
    Ok(StatusCode::NO_CONTENT)
}
