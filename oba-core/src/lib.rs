pub mod ids;
pub mod payment;
pub mod session;

pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use payment::{GatewayError, GatewayOutcome, PaymentGateway, PaymentMethod};
pub use session::{MemorySessionStore, SessionStore, UserProfile, SESSION_KEY};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
    #[error("Session storage failed: {0}")]
    SessionError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
