use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oba_core::{GatewayOutcome, PaymentMethod};
use oba_ledger::{Customer, TransactionRequest, TransactionStatus};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings/{id}/payments", post(submit_payment))
}

/// Follow-up payment against an existing booking (the installment
/// top-up path from the dashboard).
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub user_id: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub proof_of_payment: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub transaction_id: Uuid,
    pub reference: String,
    pub status: TransactionStatus,
}

/// Card payments clear through the gateway immediately; bank transfers
/// and mobile money are recorded Pending until an admin verifies the
/// proof of payment.
async fn submit_payment(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), AppError> {
    let reference = state.ids.payment_reference();
    let status = if request.payment_method.requires_verification() {
        TransactionStatus::Pending
    } else {
        match state
            .gateway
            .authorize(&reference, request.amount, request.payment_method)
            .await?
        {
            GatewayOutcome::Approved => TransactionStatus::Completed,
            GatewayOutcome::Declined { reason } => {
                return Err(AppError::PaymentDeclined(reason));
            }
        }
    };

    let mut engine = state.engine.write().await;
    let transaction_id = engine.add_transaction(TransactionRequest {
        booking_id,
        customer: Customer::from(request.user_id),
        amount: request.amount,
        payment_method: request.payment_method,
        status,
        reference: reference.clone(),
        proof_of_payment: request.proof_of_payment,
        notes: request.notes,
    })?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            transaction_id,
            reference,
            status,
        }),
    ))
}
