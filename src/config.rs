use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub cors_origin: String,
    pub select_signal_delay_ms: u64,
    pub assistant_delay_ms: u64,
    pub event_capacity: usize,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let defaults = Self::default();
        let config = Self {
            port: env_or("PORT", defaults.port),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            select_signal_delay_ms: env_or("SELECT_SIGNAL_DELAY_MS", defaults.select_signal_delay_ms),
            assistant_delay_ms: env_or("ASSISTANT_DELAY_MS", defaults.assistant_delay_ms),
            event_capacity: env_or("EVENT_CAPACITY", defaults.event_capacity),
        };

        anyhow::ensure!(config.event_capacity > 0, "EVENT_CAPACITY must be positive");
        Ok(config)
    }

    pub fn select_signal_delay(&self) -> Duration {
        Duration::from_millis(self.select_signal_delay_ms)
    }

    pub fn assistant_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 21547,
            database_url: "sqlite:devops-hub.db".into(),
            cors_origin: "http://localhost:5173".into(),
            select_signal_delay_ms: 100,
            assistant_delay_ms: 1500,
            event_capacity: 100,
        }
    }
}
