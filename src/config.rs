//! Application configuration loaded from TOML.
//!
//! ```toml
//! base_path = "/dist/index.html"
//! root_id = "root"
//! log_level = "debug"
//!
//! [[routes]]
//! path = "/dist/index.html/about"
//! component = "About"
//! props = { title = "About us" }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use waypoint_core::Props;

/// Top-level application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Prefix joined onto every navigation target.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Id of the host element the application renders into.
    #[serde(default = "default_root_id")]
    pub root_id: String,
    /// Default log level, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Routes registered on top of the ones defined in code.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A route declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Full path, base prefix included.
    pub path: String,
    /// Name of the component to render.
    pub component: String,
    /// Props handed to the component.
    #[serde(default)]
    pub props: Props,
}

fn default_base_path() -> String {
    "/dist/index.html".to_string()
}

fn default_root_id() -> String {
    "root".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            root_id: default_root_id(),
            log_level: default_log_level(),
            routes: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or does not match the schema.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse application config")
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), routes = config.routes.len(), "config loaded");
        Ok(config)
    }
}
