use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::env;

use crate::reservation_store::ShowSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub show: ShowConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShowConfig {
    pub title: String,
    pub total_seats: usize,
    /// Offset from boot time at which the show starts.
    pub starts_in_minutes: i64,
}

impl ShowConfig {
    pub fn settings(&self, now: DateTime<Utc>) -> ShowSettings {
        ShowSettings {
            title: self.title.clone(),
            starts_at: now + Duration::minutes(self.starts_in_minutes),
            total_seats: self.total_seats,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Layers built-in defaults, `{dir}/default`, `{dir}/{run_mode}`, `{dir}/local`
    /// and `MARQUEE__*` environment variables, later sources winning.
    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("show.title", "The Sample Movie")?
            .set_default("show.total_seats", 20)?
            .set_default("show.starts_in_minutes", 120)?
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            .add_source(config::Environment::with_prefix("MARQUEE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
