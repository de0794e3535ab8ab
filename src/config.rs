//! Application configuration.
//!
//! Values are read with priority `config.toml` > environment (including `.env`) >
//! built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Name of the optional configuration file in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Parse a config file, returning None if it is missing or malformed
pub fn read_config(path: &Path) -> Option<AppConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Load `.env` (if present) and `config.toml` (if present)
pub fn load() -> AppConfig {
    let _ = dotenvy::dotenv();
    read_config(Path::new(CONFIG_FILE)).unwrap_or_default()
}

// ==================== Database Configuration ====================

/// Resolve the progress database path with priority: config.toml > DATABASE_PATH > default
pub fn database_path(config: &AppConfig) -> PathBuf {
    if let Some(path) = config.database.as_ref().and_then(|db| db.path.clone()) {
        tracing::info!("Using database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::db_path());
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Default address to bind to
pub const SERVER_ADDR: &str = "127.0.0.1";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

/// Resolve the bind address with priority: config.toml > HOST/PORT env > defaults
pub fn server_bind_addr(config: &AppConfig) -> String {
    let server = config.server.as_ref();

    let host = server
        .and_then(|s| s.host.clone())
        .or_else(|| std::env::var("HOST").ok())
        .unwrap_or_else(|| SERVER_ADDR.to_string());

    let port = server
        .and_then(|s| s.port)
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    format!("{}:{}", host, port)
}

// ==================== Deck Session Configuration ====================

/// Open decks are dropped after this many hours without access
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_config_full() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"/tmp/jp.db\"\n\n[server]\nhost = \"0.0.0.0\"\nport = 8080\n",
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(database_path(&config), PathBuf::from("/tmp/jp.db"));
        assert_eq!(server_bind_addr(&config), "0.0.0.0:8080");
    }

    #[test]
    fn test_read_config_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(read_config(&temp.path().join("config.toml")).is_none());
    }

    #[test]
    fn test_read_config_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(read_config(&path).is_none());
    }

    #[test]
    fn test_partial_server_section() {
        let config: AppConfig = toml::from_str("[server]\nport = 4100\n").unwrap();
        assert!(server_bind_addr(&config).ends_with(":4100"));
    }
}
