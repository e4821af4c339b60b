use std::sync::Arc;

use tokio::sync::RwLock;

use oba_core::{IdGenerator, PaymentGateway, SessionStore};
use oba_ledger::TravelEngine;

use crate::config::BusinessRules;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<TravelEngine>>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub ids: Arc<dyn IdGenerator>,
    pub sessions: Arc<dyn SessionStore>,
    pub rules: BusinessRules,
    pub admin_email: String,
}
