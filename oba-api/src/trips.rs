use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use oba_catalog::{Trip, TripFilter};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips))
        .route("/trips/{id}", get(get_trip))
}

/// Browse the catalog with optional search/category/price filters.
async fn list_trips(
    State(state): State<AppState>,
    Query(filter): Query<TripFilter>,
) -> Json<Vec<Trip>> {
    let engine = state.engine.read().await;
    Json(engine.search_trips(&filter).into_iter().cloned().collect())
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trip>, AppError> {
    let engine = state.engine.read().await;
    engine
        .trip(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {id}")))
}
