use std::time::Duration;

use async_trait::async_trait;

use oba_core::{GatewayError, GatewayOutcome, PaymentGateway, PaymentMethod};

/// Stand-in for the real payment provider. Sleeps for the configured
/// latency, then approves everything except the decline trigger
/// reference used in tests and demos.
pub struct MockGateway {
    latency: Duration,
    decline_reference: Option<String>,
    decline_all: bool,
}

impl MockGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            decline_reference: None,
            decline_all: false,
        }
    }

    /// Charges carrying this reference are declined.
    pub fn with_decline_trigger(mut self, reference: impl Into<String>) -> Self {
        self.decline_reference = Some(reference.into());
        self
    }

    /// Gateway that declines every charge, for exercising failure
    /// paths.
    pub fn declining() -> Self {
        Self {
            latency: Duration::ZERO,
            decline_reference: None,
            decline_all: true,
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn authorize(
        &self,
        reference: &str,
        amount: f64,
        method: PaymentMethod,
    ) -> Result<GatewayOutcome, GatewayError> {
        tokio::time::sleep(self.latency).await;
        if self.decline_all || self.decline_reference.as_deref() == Some(reference) {
            tracing::warn!(reference, amount, "gateway declined charge");
            return Ok(GatewayOutcome::Declined {
                reason: "card declined by issuer".to_string(),
            });
        }
        tracing::debug!(reference, amount, ?method, "gateway approved charge");
        Ok(GatewayOutcome::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn approves_by_default() {
        let gateway = MockGateway::new(Duration::ZERO);
        let outcome = gateway
            .authorize("TXN-1", 360.0, PaymentMethod::Card)
            .await
            .unwrap();
        assert_eq!(outcome, GatewayOutcome::Approved);
    }

    #[tokio::test]
    async fn declines_the_trigger_reference() {
        let gateway = MockGateway::new(Duration::ZERO).with_decline_trigger("TXN-FAIL");
        let outcome = gateway
            .authorize("TXN-FAIL", 360.0, PaymentMethod::Card)
            .await
            .unwrap();
        assert!(matches!(outcome, GatewayOutcome::Declined { .. }));
    }
}
