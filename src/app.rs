use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::catch::RollSource;
use crate::routes;
use crate::store::CollectionStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub store: Arc<CollectionStore>,
    pub rolls: Arc<dyn RollSource>,
}

pub fn build_routes() -> Router<AppState> {
    Router::new()
        .merge(routes::location_routes())
        .merge(routes::pokemon_routes())
}

/// The full service: API routes under `/api`, permissive CORS for the web
/// client, and request tracing.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Pokedex API" }))
        .nest("/api", build_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
