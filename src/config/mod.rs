use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env_var)
    }

    /// Load settings through `var`, which returns the value of a variable if set
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Settings {
            server: ServerConfig::from_vars(&var)?,
            dataset: DatasetConfig::from_vars(&var),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.max_request_body_size == 0 {
            return Err(Error::Config(
                "Request body limit must be non-zero".to_string(),
            ));
        }

        if self.dataset.path.as_os_str().is_empty() {
            return Err(Error::Config("Dataset path must not be empty".to_string()));
        }

        Ok(())
    }
}

impl ServerConfig {
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let max_request_body_size = var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        Ok(ServerConfig {
            host,
            port,
            max_request_body_size,
        })
    }
}

impl DatasetConfig {
    /// Dataset location only; commands that never serve don't read server variables
    pub fn from_env() -> Self {
        Self::from_vars(env_var)
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let path = var("DATASET_PATH")
            .unwrap_or_else(|| "random_100_recipes.csv".to_string())
            .into();

        DatasetConfig { path }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
