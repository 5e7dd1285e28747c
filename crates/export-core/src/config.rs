//! Export configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/rsocket-export/config.toml`
//! - macOS: `~/Library/Application Support/rsocket-export/config.toml`
//! - Windows: `%APPDATA%\rsocket-export\config.toml`
//!
//! A missing default file means "use defaults"; a missing explicit file is an
//! error.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_core::{ExportConfig, MethodOrdering};
//!
//! let config = ExportConfig::from_toml_str(r#"
//! application_name = "user-service"
//! method_ordering = "alphabetical"
//! "#).unwrap();
//!
//! assert_eq!(config.application_name, "user-service");
//! assert_eq!(config.method_ordering, MethodOrdering::Alphabetical);
//! assert!(config.emit_declarations);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Order in which exported methods appear in generated artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodOrdering {
    /// Order of the methods in the reflection document.
    #[default]
    Declaration,
    /// Stable sort by method name.
    Alphabetical,
}

/// Settings shared by the CLI and the export server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the application hosting the services.
    ///
    /// Appears in generated package descriptions.
    /// Default: `"rsocket-app"`
    pub application_name: String,

    /// Directory scanned for service reflection documents.
    /// Default: `contracts`
    pub contracts_dir: PathBuf,

    /// Socket address the export server listens on.
    /// Default: `127.0.0.1:8080`
    pub bind: String,

    /// Public base URL used in the package listing.
    ///
    /// When `None`, `http://<bind>` is used.
    pub base_url: Option<String>,

    /// Method ordering for generated artifacts.
    pub method_ordering: MethodOrdering,

    /// Whether `index.d.ts` is generated and referenced from the manifest.
    /// Default: true
    pub emit_declarations: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            application_name: "rsocket-app".to_string(),
            contracts_dir: PathBuf::from("contracts"),
            bind: "127.0.0.1:8080".to_string(),
            base_url: None,
            method_ordering: MethodOrdering::Declaration,
            emit_declarations: true,
        }
    }
}

impl ExportConfig {
    /// File name of the configuration inside the config directory.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the text is not valid TOML for this
    /// structure or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or `Error::ConfigError`
    /// if it cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing default file yields [`ExportConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load_from(&default),
            _ => {
                debug!("Config file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Platform-specific default configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rsocket-export").join(Self::FILE_NAME))
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the application name is blank or the
    /// bind address is not a socket address.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::ExportConfig;
    ///
    /// let mut config = ExportConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.bind = "not-an-address".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.application_name.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "application_name cannot be empty".to_string(),
            });
        }

        self.bind_addr()?;

        if let Some(base) = &self.base_url
            && !(base.starts_with("http://") || base.starts_with("https://"))
        {
            return Err(Error::ConfigError {
                message: format!("base_url '{base}' must start with http:// or https://"),
            });
        }

        Ok(())
    }

    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| Error::ConfigError {
            message: format!("invalid bind address '{}': {e}", self.bind),
        })
    }

    /// Base URL advertised in the package listing, without trailing slash.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        self.base_url.as_ref().map_or_else(
            || format!("http://{}", self.bind),
            |url| url.trim_end_matches('/').to_string(),
        )
    }
}
