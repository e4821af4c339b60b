use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthSettings,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub admin_email: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Simulated processing time of the mock payment gateway.
    pub gateway_latency_ms: u64,
    /// Cap on travelers in a single checkout.
    #[serde(default = "default_max_travelers")]
    pub max_travelers_per_booking: u32,
}

fn default_max_travelers() -> u32 {
    8
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional.
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            // OBA__SERVER__PORT=9000 style environment overrides.
            .add_source(config::Environment::with_prefix("OBA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
