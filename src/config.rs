//! Runtime settings.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file
//! (`inventix.toml` in the working directory, or `--config <file>`), then
//! `INVENTIX__SECTION__KEY` environment variables. Command-line flags are
//! applied on top by `main`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub backend: BackendSettings,
    pub sale: SaleSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    /// Seconds before a request is abandoned; `0` waits forever.
    pub timeout_secs: u64,
    pub customers_path: String,
    pub products_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleSettings {
    pub mailbox_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendSettings {
                base_url: "http://127.0.0.1:5000".to_string(),
                timeout_secs: 30,
                customers_path: "api/clientes".to_string(),
                products_path: "api/productos".to_string(),
            },
            sale: SaleSettings { mailbox_size: 32 },
            log: LogSettings { filter: "info".to_string() },
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("backend.base_url", defaults.backend.base_url)?
            .set_default("backend.timeout_secs", defaults.backend.timeout_secs as i64)?
            .set_default("backend.customers_path", defaults.backend.customers_path)?
            .set_default("backend.products_path", defaults.backend.products_path)?
            .set_default("sale.mailbox_size", defaults.sale.mailbox_size as i64)?
            .set_default("log.filter", defaults.log.filter)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("inventix").required(false)),
        };

        builder
            .add_source(Environment::with_prefix("INVENTIX").separator("__"))
            .build()?
            .try_deserialize()
    }
}
