use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Fixed key the current profile is persisted under.
pub const SESSION_KEY: &str = "user";

/// The signed-in customer as the presentation layer sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Key-value persistence for the session record. Mirrors the browser
/// local-storage contract: one serialized profile under a fixed key.
pub trait SessionStore: Send + Sync {
    fn save(&self, profile: &UserProfile) -> CoreResult<()>;
    fn load(&self) -> CoreResult<Option<UserProfile>>;
    fn clear(&self) -> CoreResult<()>;
}

/// In-memory session store used by the API and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, profile: &UserProfile) -> CoreResult<()> {
        let encoded = serde_json::to_string(profile)
            .map_err(|e| CoreError::SessionError(e.to_string()))?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::SessionError("store poisoned".into()))?;
        entries.insert(SESSION_KEY.to_string(), encoded);
        Ok(())
    }

    fn load(&self) -> CoreResult<Option<UserProfile>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::SessionError("store poisoned".into()))?;
        match entries.get(SESSION_KEY) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| CoreError::SessionError(e.to_string())),
            None => Ok(None),
        }
    }

    fn clear(&self) -> CoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::SessionError("store poisoned".into()))?;
        entries.remove(SESSION_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            email: "traveler@example.com".to_string(),
            name: "Traveler".to_string(),
            phone: None,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn session_round_trips_under_fixed_key() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&profile()).unwrap();
        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored.email, "traveler@example.com");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
