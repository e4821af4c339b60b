use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oba_core::{GatewayOutcome, PaymentMethod};
use oba_ledger::{
    models::deposit_amount, Booking, BookingRequest, Customer, DashboardView, GuestInfo,
    InstallmentRate, PaymentPlan, Transaction,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(checkout))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/transactions", get(booking_transactions))
        .route("/users/{id}/bookings", get(user_bookings))
        .route("/users/{id}/dashboard", get(user_dashboard))
        .route("/users/{id}/transactions", get(user_transactions))
}

/// Checkout form payload. A missing `user_id` means guest checkout,
/// which requires contact details and a full-payment plan.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub trip_id: Uuid,
    pub user_id: Option<String>,
    pub travelers: u32,
    pub payment_plan: PaymentPlan,
    pub installment_percentage: Option<u8>,
    pub notes: Option<String>,
    pub guest_info: Option<GuestInfo>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub booking_id: Uuid,
    pub transaction_id: Uuid,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub outstanding: f64,
}

/// Create a booking: authorize the amount due now with the payment
/// gateway, then commit it to the ledger.
async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError> {
    if request.travelers > state.rules.max_travelers_per_booking {
        return Err(AppError::ValidationError(format!(
            "At most {} travelers per booking",
            state.rules.max_travelers_per_booking
        )));
    }
    let rate = request
        .installment_percentage
        .map(InstallmentRate::try_from)
        .transpose()
        .map_err(AppError::ValidationError)?;
    let customer = match request.user_id {
        Some(id) => Customer::Registered(id),
        None => Customer::Guest,
    };

    // Price the charge before taking the write lock; the gateway call
    // simulates real processing latency.
    let due_now = {
        let engine = state.engine.read().await;
        let trip = engine
            .trip(request.trip_id)
            .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {}", request.trip_id)))?;
        let total = trip.price * f64::from(request.travelers);
        match rate {
            Some(rate) => deposit_amount(total, rate),
            None => total,
        }
    };

    let reference = state.ids.payment_reference();
    match state
        .gateway
        .authorize(&reference, due_now, PaymentMethod::Card)
        .await?
    {
        GatewayOutcome::Approved => {}
        GatewayOutcome::Declined { reason } => {
            return Err(AppError::PaymentDeclined(reason));
        }
    }

    let mut engine = state.engine.write().await;
    let receipt = engine.create_booking(BookingRequest {
        trip_id: request.trip_id,
        customer,
        travelers: request.travelers,
        payment_plan: request.payment_plan,
        installment_rate: rate,
        notes: request.notes,
        guest_info: request.guest_info,
    })?;
    let booking = engine
        .booking(receipt.booking_id)
        .ok_or_else(|| AppError::Anyhow(anyhow::anyhow!("booking vanished after creation")))?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            booking_id: receipt.booking_id,
            transaction_id: receipt.transaction_id,
            total_amount: booking.total_amount,
            paid_amount: booking.paid_amount,
            outstanding: booking.outstanding(),
        }),
    ))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let engine = state.engine.read().await;
    engine
        .booking(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Booking not found: {id}")))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let mut engine = state.engine.write().await;
    engine.cancel_booking(id)?;
    let booking = engine
        .booking(id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError(format!("Booking not found: {id}")))?;
    Ok(Json(booking))
}

async fn booking_transactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<Transaction>> {
    let engine = state.engine.read().await;
    Json(
        engine
            .booking_transactions(id)
            .into_iter()
            .cloned()
            .collect(),
    )
}

async fn user_bookings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Booking>> {
    let engine = state.engine.read().await;
    Json(
        engine
            .user_bookings(&Customer::from(id))
            .into_iter()
            .cloned()
            .collect(),
    )
}

async fn user_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DashboardView> {
    let engine = state.engine.read().await;
    Json(engine.user_dashboard(&Customer::from(id)))
}

async fn user_transactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Transaction>> {
    let engine = state.engine.read().await;
    Json(
        engine
            .user_transactions(&Customer::from(id))
            .into_iter()
            .cloned()
            .collect(),
    )
}
