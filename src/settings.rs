//! Service settings, read with the `config` crate.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. an optional `stringlens.{toml,json,yaml}` file, or the file named by
//!    `STRINGLENS_CONFIG`
//! 3. environment variables such as `STRINGLENS__SERVER__PORT=8080`
//! 4. a bare `PORT` variable

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::construct::PersistenceMode;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub persistence: PersistenceSettings,
    pub log: LogSettings,
    #[serde(default)]
    pub filters: FilterSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersistenceSettings {
    /// SQLite file; the database lives in memory when absent.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Fallback for `RUST_LOG`.
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FilterSettings {
    /// Reject `GET /strings` when `min_length` exceeds `max_length`, as the
    /// natural language search does. Off by default, in which case such a
    /// query simply matches nothing.
    #[serde(default)]
    pub reject_inverted_range: bool,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let file = std::env::var("STRINGLENS_CONFIG").unwrap_or_else(|_| "stringlens".into());
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("log.filter", "info")?
            .set_default("filters.reject_inverted_range", false)?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("STRINGLENS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    pub fn persistence_mode(&self) -> PersistenceMode {
        match &self.persistence.path {
            Some(path) => PersistenceMode::File(path.clone()),
            None => PersistenceMode::InMemory,
        }
    }
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
