//! Configuration module for the course catalog.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which backing medium holds the course collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// A single pretty-printed JSON file (server variant).
    File,
    /// A single key in a SQLite slot table (client variant).
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(StorageKind::File),
            "sqlite" | "slot" => Ok(StorageKind::Sqlite),
            other => Err(ConfigError::UnknownStorage(other.to_string())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidPort(String),
    UnknownStorage(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBindAddr(v) => write!(f, "Invalid COURSES_BIND_ADDR format: {}", v),
            ConfigError::InvalidPort(v) => write!(f, "Invalid PORT value: {}", v),
            ConfigError::UnknownStorage(v) => write!(f, "Unknown COURSES_STORAGE kind: {}", v),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Backing medium for the collection
    pub storage: StorageKind,
    /// Path to the JSON data file (file storage)
    pub data_file: PathBuf,
    /// Path to the SQLite slot database (sqlite storage)
    pub db_path: PathBuf,
    /// Directory holding the client application shell
    pub public_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bind_addr: SocketAddr = var("COURSES_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::InvalidBindAddr(var("COURSES_BIND_ADDR").unwrap_or_default())
            })?;

        if var("COURSES_BIND_ADDR").is_none() {
            if let Some(port) = var("PORT") {
                let port: u16 = port
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
                bind_addr.set_port(port);
            }
        }

        let storage = var("COURSES_STORAGE")
            .map(|s| s.parse::<StorageKind>())
            .transpose()?
            .unwrap_or(StorageKind::File);

        let data_file = var("COURSES_DATA_FILE")
            .unwrap_or_else(|| "./data/courses.json".to_string())
            .into();

        let db_path = var("COURSES_DB_PATH")
            .unwrap_or_else(|| "./data/client.sqlite".to_string())
            .into();

        let public_dir = var("COURSES_PUBLIC_DIR")
            .unwrap_or_else(|| "./public".to_string())
            .into();

        let log_level = var("COURSES_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            bind_addr,
            storage,
            data_file,
            db_path,
            public_dir,
            log_level,
        })
    }
}
