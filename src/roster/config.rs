//! # Configuration
//!
//! Stored as `config.json` in the roster home directory (see [`crate::init`]).
//! Missing files and missing keys fall back to compiled defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base-url` | `http://localhost:3000` | Server the admin API lives on |
//! | `page-size` | server default | Rows per page; fixed for a session once set |
//! | `agency-id` | none | Scopes the list to one agency |
//! | `current-user` | none | Username of the administrator running the tool |

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub const KEYS: &[&str] = &["base-url", "page-size", "agency-id", "current-user"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: None,
            agency_id: None,
            current_user: None,
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Value of `key` for display. Unset optional keys read as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "base-url" => self.base_url.clone(),
            "page-size" => self.page_size.map(|s| s.to_string()).unwrap_or_default(),
            "agency-id" => self.agency_id.clone().unwrap_or_default(),
            "current-user" => self.current_user.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "base-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(RosterError::Config(format!(
                        "base-url must start with http:// or https://, got {}",
                        value
                    )));
                }
                self.base_url = value.trim_end_matches('/').to_string();
            }
            "page-size" => {
                let size: u32 = value.parse().map_err(|_| {
                    RosterError::Config(format!("page-size must be a number, got {}", value))
                })?;
                if size == 0 {
                    return Err(RosterError::Config(
                        "page-size must be at least 1".to_string(),
                    ));
                }
                self.page_size = Some(size);
            }
            "agency-id" => self.agency_id = Some(value.to_string()).filter(|v| !v.is_empty()),
            "current-user" => {
                self.current_user = Some(value.to_string()).filter(|v| !v.is_empty())
            }
            _ => return Err(RosterError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// Clears an optional key; `base-url` goes back to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "base-url" => self.base_url = default_base_url(),
            "page-size" => self.page_size = None,
            "agency-id" => self.agency_id = None,
            "current-user" => self.current_user = None,
            _ => return Err(RosterError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .map(|k| (*k, self.get(k).unwrap_or_default()))
            .collect()
    }
}
