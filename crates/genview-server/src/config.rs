//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default project directory.
pub const DEFAULT_DATA_DIR: &str = ".";

/// Default CORS allowed origin.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Where the project artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    /// Explicit manifest; `<data_dir>/genview.yml` is used when unset
    pub manifest: Option<PathBuf>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            server: ServerConfig {
                host: lookup("GENVIEW_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
                port: lookup("GENVIEW_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: lookup("GENVIEW_SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            data: DataConfig {
                data_dir: lookup("GENVIEW_DATA_DIR")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                    .into(),
                manifest: lookup("GENVIEW_MANIFEST")
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: lookup("CORS_ALLOW_CREDENTIALS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(false),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.host.trim().is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        if !self.data.data_dir.is_dir() {
            anyhow::bail!(
                "Data directory '{}' does not exist or is not a directory",
                self.data.data_dir.display()
            );
        }

        if self.cors.allowed_origins.is_empty() {
            anyhow::bail!("At least one CORS origin must be specified");
        }

        if self.cors.allow_credentials && self.cors.allows_any_origin() {
            anyhow::bail!("CORS_ALLOW_CREDENTIALS cannot be combined with a wildcard origin");
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
