use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::app::AppState;
use crate::cursor::{self, PageToken};
use crate::error::Result;
use crate::models::{LocationsQuery, LocationsResponse};
use crate::session::{self, Exploration};

pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationsQuery>,
) -> Result<Json<LocationsResponse>> {
    let catalog = state.catalog.as_ref();
    let api_base = catalog.api_base();
    let (cursor, page) = match query.url.as_deref() {
        Some(raw) if !raw.trim().is_empty() => {
            let token = PageToken::from_client(raw, api_base)?;
            cursor::fetch(catalog, &token).await?
        }
        _ => cursor::first_page(catalog).await?,
    };

    Ok(Json(LocationsResponse {
        next: cursor.next_token(api_base),
        previous: cursor.previous_token(api_base),
        page: cursor.current_page_number(),
        total_pages: cursor.total_pages(),
        provider_next: cursor.next,
        provider_previous: cursor.previous,
        count: cursor.count,
        locations: page.locations,
    }))
}

pub async fn explore_location(
    State(state): State<AppState>,
    Path(area): Path<String>,
) -> Result<Json<Exploration>> {
    let exploration = session::explore(state.catalog.clone(), &state.store, &area).await?;
    Ok(Json(exploration))
}
