//! Runtime configuration, layered with `figment`: built-in defaults first,
//! then `NACPLAN_*` environment variables (`NACPLAN_PORT` → `port`).
//!
//! Logging verbosity is not part of this struct; it follows `RUST_LOG`
//! through `env_logger` in `main.rs`.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_PREFIX: &str = "NACPLAN_";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "nacplan.sqlite";
const DEFAULT_STAGE_DELAY_MS: u64 = 400;
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file backing the store.
    pub database_path: PathBuf,
    /// Pause between demo loader stages. Zero disables it.
    pub demo_stage_delay: Duration,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
}

/// Flat key layout as it appears in the environment.
#[derive(Debug, Serialize, Deserialize)]
struct Settings {
    host: String,
    port: u16,
    database: PathBuf,
    demo_stage_delay_ms: u64,
    json_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            demo_stage_delay_ms: DEFAULT_STAGE_DELAY_MS,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl From<Settings> for AppConfig {
    fn from(settings: Settings) -> Self {
        AppConfig {
            host: settings.host,
            port: settings.port,
            database_path: settings.database,
            demo_stage_delay: Duration::from_millis(settings.demo_stage_delay_ms),
            json_limit: settings.json_limit,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Settings::default().into()
    }
}

impl AppConfig {
    /// Defaults merged with the process environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        Self::from_figment(Self::figment())
    }

    /// Extracts the configuration from any figment, so callers can layer
    /// their own providers on top of the defaults.
    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let settings: Settings = figment.extract()?;
        if settings.host.trim().is_empty() {
            return Err(figment::Error::from(format!("{}HOST must not be empty", ENV_PREFIX)));
        }
        if settings.database.as_os_str().is_empty() {
            return Err(figment::Error::from(format!(
                "{}DATABASE must not be empty",
                ENV_PREFIX
            )));
        }
        Ok(settings.into())
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
