//! Server configuration, read from the environment (and a `.env` file when present).
//!
//! | Variable                 | Default           |
//! |--------------------------|-------------------|
//! | `HERDBOOK_HOST`          | `127.0.0.1`       |
//! | `HERDBOOK_PORT`          | `8080`            |
//! | `HERDBOOK_DATABASE`      | `herdbook.sqlite` |
//! | `HERDBOOK_JSON_LIMIT_MB` | `10`              |

use std::env;

const MIB: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Maximum accepted request body, for JSON and multipart uploads alike.
    pub json_limit_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("HERDBOOK_PORT", "8080");
        let port = port.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "HERDBOOK_PORT",
            value: port.clone(),
            expected: "a port number",
        })?;

        let limit = var("HERDBOOK_JSON_LIMIT_MB", "10");
        let limit_mb = match limit.parse::<usize>() {
            Ok(mb) if mb > 0 => mb,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "HERDBOOK_JSON_LIMIT_MB",
                    value: limit,
                    expected: "a positive number of megabytes",
                })
            }
        };

        Ok(AppConfig {
            host: var("HERDBOOK_HOST", "127.0.0.1"),
            port,
            database_path: var("HERDBOOK_DATABASE", "herdbook.sqlite"),
            json_limit_bytes: limit_mb * MIB,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
