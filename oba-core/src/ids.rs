use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Id generation behind a trait so stores can be driven with
/// deterministic ids in tests.
pub trait IdGenerator: Send + Sync {
    /// Fresh entity id.
    fn next_id(&self) -> Uuid;

    /// Human-facing payment reference shown on receipts.
    fn payment_reference(&self) -> String {
        format!("TXN-{}", Utc::now().timestamp_millis())
    }
}

/// Production generator: random v4 ids.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Monotonic generator for tests: ids 1, 2, 3, ... encoded as UUIDs,
/// references TXN-1, TXN-2, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(n as u128)
    }

    fn payment_reference(&self) -> String {
        format!("TXN-{}", self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
