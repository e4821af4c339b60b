use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use oba_catalog::{TripDraft, TripPatch};
use oba_ledger::{AdminOverview, Booking, Transaction};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/trips", post(add_trip))
        .route("/admin/trips/{id}", put(update_trip))
        .route("/admin/trips/{id}", delete(delete_trip))
        .route("/admin/overview", get(overview))
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/transactions", get(list_transactions))
        .route("/admin/transactions/{id}/approve", post(approve_transaction))
        .route("/admin/transactions/{id}/reject", post(reject_transaction))
}

#[derive(Debug, Serialize)]
struct TripCreated {
    id: Uuid,
}

async fn add_trip(
    State(state): State<AppState>,
    Json(draft): Json<TripDraft>,
) -> Result<(StatusCode, Json<TripCreated>), AppError> {
    let mut engine = state.engine.write().await;
    let id = engine.add_trip(draft)?;
    Ok((StatusCode::CREATED, Json(TripCreated { id })))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TripPatch>,
) -> Result<StatusCode, AppError> {
    let mut engine = state.engine.write().await;
    if engine.update_trip(id, patch) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("Trip not found: {id}")))
    }
}

/// Deletion is refused while bookings reference the trip; the rejection
/// surfaces as a conflict the admin console shows to the operator.
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut engine = state.engine.write().await;
    engine.delete_trip(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn overview(State(state): State<AppState>) -> Json<AdminOverview> {
    let engine = state.engine.read().await;
    Json(engine.overview())
}

async fn list_bookings(State(state): State<AppState>) -> Json<Vec<Booking>> {
    let engine = state.engine.read().await;
    Json(engine.bookings().into_iter().cloned().collect())
}

async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    let engine = state.engine.read().await;
    Json(engine.transactions().into_iter().cloned().collect())
}

/// Approve a pending manual payment: the transaction completes and its
/// amount is credited to the booking, once.
async fn approve_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, AppError> {
    let mut engine = state.engine.write().await;
    engine.approve_transaction(id)?;
    transaction_snapshot(&engine, id)
}

/// Reject a pending manual payment: the transaction fails and the
/// booking balance is untouched.
async fn reject_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, AppError> {
    let mut engine = state.engine.write().await;
    engine.reject_transaction(id)?;
    transaction_snapshot(&engine, id)
}

fn transaction_snapshot(
    engine: &oba_ledger::TravelEngine,
    id: Uuid,
) -> Result<Json<Transaction>, AppError> {
    engine
        .transaction(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Transaction not found: {id}")))
}
