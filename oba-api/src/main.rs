use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oba_api::{app, config::Config, state::AppState};
use oba_core::{IdGenerator, MemorySessionStore, UuidIds};
use oba_ledger::{MockGateway, TravelEngine};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oba_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting OBA API on port {}", config.server.port);

    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIds);
    let engine = TravelEngine::with_seed(ids.clone());
    let gateway = MockGateway::new(Duration::from_millis(
        config.business_rules.gateway_latency_ms,
    ));

    let app_state = AppState {
        engine: Arc::new(RwLock::new(engine)),
        gateway: Arc::new(gateway),
        ids,
        sessions: Arc::new(MemorySessionStore::new()),
        rules: config.business_rules.clone(),
        admin_email: config.auth.admin_email.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
