//! Layered configuration for the Archivo+ client.
//!
//! Values are resolved in order, later layers winning:
//! defaults → `archivo.toml` → environment → command-line flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "https://archivo.example.com/api"
//! connect_timeout_secs = 10
//!
//! [session]
//! email = "operador@archivo.mx"
//! remember_me = true
//!
//! [ui]
//! color = true
//! ```
//!
//! The file is read from `$ARCHIVO_CONFIG` when set, otherwise from
//! `<config_dir>/archivo/archivo.toml`. A missing file is not an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

pub const ENV_CONFIG: &str = "ARCHIVO_CONFIG";
pub const ENV_API_BASE: &str = "ARCHIVO_API_BASE";
pub const ENV_TOKEN: &str = "ARCHIVO_TOKEN";
pub const ENV_EMAIL: &str = "ARCHIVO_EMAIL";
pub const ENV_PASSWORD: &str = "ARCHIVO_PASSWORD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    /// Email pre-filled on the login prompt
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_remember_me")]
    pub remember_me: bool,
}

fn default_remember_me() -> bool {
    true
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            email: None,
            remember_me: default_remember_me(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSection {
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Contents of `archivo.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchivoToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub ui: UiSection,
}

impl ArchivoToml {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse archivo.toml")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub api_base: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub no_color: bool,
}

/// Effective configuration after all layers are applied.
#[derive(Debug, Clone)]
pub struct ArchivoConfig {
    pub api_base: String,
    /// Bearer token sent with every request, when set
    pub token: Option<String>,
    pub email: Option<String>,
    /// Only ever read from the environment, never from the file
    pub password: Option<String>,
    pub remember_me: bool,
    pub connect_timeout: Option<Duration>,
    pub color: bool,
    /// File the TOML layer came from, if one was found
    pub config_path: Option<PathBuf>,
}

impl Default for ArchivoConfig {
    fn default() -> Self {
        Self::from_layers(ArchivoToml::default(), |_| None, CliOverrides::default(), None)
    }
}

impl ArchivoConfig {
    /// Resolve configuration from the real environment and filesystem.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    pub fn resolve(overrides: CliOverrides) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let path = overrides
            .config_path
            .clone()
            .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from))
            .or_else(default_config_path);

        let (toml, found) = match &path {
            Some(p) if p.exists() => (ArchivoToml::load(p)?, Some(p.clone())),
            _ => (ArchivoToml::default(), None),
        };

        Ok(Self::from_layers(
            toml,
            |key| std::env::var(key).ok(),
            overrides,
            found,
        ))
    }

    /// Apply the layers in order. `env` looks up one variable by name.
    pub fn from_layers<F>(
        toml: ArchivoToml,
        env: F,
        overrides: CliOverrides,
        config_path: Option<PathBuf>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_base = overrides
            .api_base
            .or_else(|| non_empty(ENV_API_BASE))
            .or(toml.api.base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let token = overrides.token.or_else(|| non_empty(ENV_TOKEN));
        let email = overrides
            .email
            .or_else(|| non_empty(ENV_EMAIL))
            .or(toml.session.email);
        let password = non_empty(ENV_PASSWORD);

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            email,
            password,
            remember_me: toml.session.remember_me,
            connect_timeout: toml.api.connect_timeout_secs.map(Duration::from_secs),
            color: toml.ui.color && !overrides.no_color,
            config_path,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("archivo").join("archivo.toml"))
}
