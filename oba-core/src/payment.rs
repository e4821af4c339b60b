use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How a payment was made. Cards clear instantly; the other two
/// methods require manual verification by an admin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    MobileMoney,
}

impl PaymentMethod {
    /// Manual methods need proof of payment and admin review before
    /// they count toward a booking's balance.
    pub fn requires_verification(&self) -> bool {
        !matches!(self, PaymentMethod::Card)
    }
}

/// Outcome of asking the gateway to authorize a charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayOutcome {
    Approved,
    Declined { reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Seam for the external payment provider. The engine never talks to a
/// real processor; callers await an authorization before committing any
/// ledger mutation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authorize(
        &self,
        reference: &str,
        amount: f64,
        method: PaymentMethod,
    ) -> Result<GatewayOutcome, GatewayError>;
}
