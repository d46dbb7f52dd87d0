use crate::error::{AppError, Result};
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub file_suffix: String,
    pub cache: bool,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: var("PORT")
                    .unwrap_or_else(|| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
            },
            catalog: CatalogConfig {
                data_dir: var("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("output")),
                file_suffix: var("DATA_SUFFIX").unwrap_or_else(|| ".json".to_string()),
                cache: parse_flag(
                    "CATALOG_CACHE",
                    &var("CATALOG_CACHE").unwrap_or_else(|| "true".to_string()),
                )?,
            },
            cors: CorsConfig {
                allowed_origins: var("FRONTEND_URL")
                    .unwrap_or_else(|| "http://localhost:3000".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::ConfigError(format!("Invalid {} value", name))),
    }
}
