use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "dashboard.ron";
const ENV_API_HOST: &str = "DASHBOARD_API_HOST";
const ENV_API_PORT: &str = "DASHBOARD_API_PORT";
const ENV_LOG: &str = "DASHBOARD_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("DASHBOARD_API_PORT is not a valid port: {0:?}")]
    InvalidPort(String),
    #[error("DASHBOARD_LOG must be one of file, terminal, both; got {0:?}")]
    InvalidLogDestination(String),
}

/// Where the backend lives and where logs go.
///
/// Resolution order: built-in defaults, then `dashboard.ron` in the working
/// directory, then `DASHBOARD_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_host: String,
    pub api_port: Option<u16>,
    pub log_destination: LogDestination,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_host: "http://localhost".to_string(),
            api_port: Some(8080),
            log_destination: LogDestination::File,
        }
    }
}

impl DashboardConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&dir, |key| std::env::var(key).ok())
    }

    pub fn load_from(
        dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = read_file(&dir.join(CONFIG_FILENAME))?.unwrap_or_default();

        if let Some(host) = env(ENV_API_HOST).filter(|host| !host.trim().is_empty()) {
            config.api_host = host.trim().to_string();
        }
        if let Some(port) = env(ENV_API_PORT) {
            let parsed = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            config.api_port = Some(parsed);
        }
        if let Some(destination) = env(ENV_LOG) {
            config.log_destination = destination
                .parse()
                .map_err(ConfigError::InvalidLogDestination)?;
        }
        Ok(config)
    }

    /// Base endpoint shared by every job route and the health check.
    pub fn endpoint(&self) -> String {
        match self.api_port {
            Some(port) => format!("{}:{}", self.api_host.trim_end_matches('/'), port),
            None => self.api_host.clone(),
        }
    }
}

fn read_file(path: &Path) -> Result<Option<DashboardConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
