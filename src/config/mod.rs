/// Configuration management for the dnaflow server
///
/// Handles server configuration, database location, seeding and log level.
/// Every field can be overridden through a DNAFLOW_* environment variable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Default tracing filter when RUST_LOG is not set (e.g., "info", "dnaflow=debug")
    pub log_level: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
    /// Directory holding a pre-built admin UI bundle, served for unmatched routes
    pub static_dir: Option<String>,
}

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file (default: "data")
    pub data_dir: String,
    /// Database file name inside `data_dir` (default: "dnaflow.db")
    pub file_name: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Load the default laboratory fixture into an empty database
    pub seed: bool,
}

impl DatabaseConfig {
    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.file_name)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("DNAFLOW_HOST", "0.0.0.0"),
                port: env_or("DNAFLOW_PORT", "3004").parse().unwrap_or(3004),
                static_dir: std::env::var("DNAFLOW_STATIC_DIR")
                    .ok()
                    .filter(|dir| !dir.is_empty()),
            },
            database: DatabaseConfig {
                data_dir: env_or("DNAFLOW_DATA_DIR", "data"),
                file_name: env_or("DNAFLOW_DB_FILE", "dnaflow.db"),
                max_connections: env_or("DNAFLOW_MAX_CONNECTIONS", "5").parse().unwrap_or(5),
                seed: parse_flag(&env_or("DNAFLOW_SEED", "true")),
            },
            log_level: env_or("DNAFLOW_LOG", "info"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
