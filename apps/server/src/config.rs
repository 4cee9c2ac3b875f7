//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL.
    pub database_url: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("MEALTRACK_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("MEALTRACK_SERVER_PORT")
                .unwrap_or_else(|_| "3333".to_string())
                .parse()
                .unwrap_or(3333),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:mealtrack.db?mode=rwc".to_string()),
            log_level: env::var("MEALTRACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3333,
            database_url: "sqlite:mealtrack.db?mode=rwc".to_string(),
            log_level: "info".to_string(),
        }
    }
}
