use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lookup::FallbackMatch;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file holding the lookup cache
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_primary_base_url")]
    pub primary_base_url: String,

    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    #[serde(default = "default_bulk_archive_url")]
    pub bulk_archive_url: String,

    /// Applies to each primary and registry request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub fallback_match: FallbackMatch,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("callsigns.db")
}

fn default_primary_base_url() -> String {
    "https://callsigns.spyoung.com/callsigns".to_string()
}

fn default_registry_url() -> String {
    "https://data.fcc.gov/api/license-view/basicSearch/getLicenses".to_string()
}

fn default_bulk_archive_url() -> String {
    "https://data.fcc.gov/download/pub/uls/complete/l_amat.zip".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("callsigns/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "callsigns=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            primary_base_url: default_primary_base_url(),
            registry_url: default_registry_url(),
            bulk_archive_url: default_bulk_archive_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            log_level: default_log_level(),
            fallback_match: FallbackMatch::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Directory for downloaded bulk data, next to the database file
    pub fn data_dir(&self) -> PathBuf {
        match self.database_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
