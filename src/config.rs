//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// SQLite database location
    pub database_url: String,
    /// Directory where uploaded pictures are written
    pub upload_dir: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            storage: StorageConfig {
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:items.db".to_string()),
                upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("HOST");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("UPLOAD_DIR");

        let config = Config::from_env();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.database_url, "sqlite:items.db");
        assert_eq!(config.storage.upload_dir, "uploads");
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("PORT", "9000");
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("UPLOAD_DIR", "/var/pictures");

        let config = Config::from_env();
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
        assert_eq!(config.storage.upload_dir, "/var/pictures");

        std::env::remove_var("PORT");
        std::env::remove_var("HOST");
        std::env::remove_var("UPLOAD_DIR");
    }
}
