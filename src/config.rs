//! Process configuration, read once from the environment at startup

use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_AGENT_BASE_URL: &str = "https://api.smythos.com";
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint for the external venue agent
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub agent_id: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl AgentConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("SMYTHOS_API_KEY"),
            agent_id: non_empty_var("SMYTHOS_AGENT_ID"),
            base_url: non_empty_var("SMYTHOS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AGENT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                non_empty_var("SMYTHOS_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_AGENT_TIMEOUT_SECS),
            ),
        }
    }

    /// Key and agent id, when both are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.agent_id.as_deref()) {
            (Some(key), Some(agent)) if !key.is_empty() && !agent.is_empty() => {
                Some((key, agent))
            }
            _ => None,
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    pub public_dir: PathBuf,
    pub frontend_dist: PathBuf,
    pub agent: AgentConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: non_empty_var("VENUE_DESK_DB_PATH")
                .map_or_else(|| PathBuf::from("data/venues.db"), PathBuf::from),
            port: non_empty_var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            public_dir: non_empty_var("VENUE_DESK_PUBLIC_DIR")
                .map_or_else(|| PathBuf::from("public"), PathBuf::from),
            frontend_dist: non_empty_var("VENUE_DESK_FRONTEND_DIST")
                .map_or_else(|| PathBuf::from("frontend/dist"), PathBuf::from),
            agent: AgentConfig::from_env(),
        }
    }
}

/// Load variables from an env file without overriding ones already set.
///
/// Returns `Ok(false)` when the file does not exist.
pub fn load_dotenv(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
