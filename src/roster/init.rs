use crate::api::UserListController;
use crate::config::RosterConfig;
use crate::directory::http::HttpDirectory;
use crate::error::{Result, RosterError};
use crate::model::AdminContext;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Overrides the config file for a single invocation.
pub const HOME_ENV: &str = "ROSTER_HOME";

pub struct RosterContext {
    pub api: UserListController<HttpDirectory>,
    pub config: RosterConfig,
    pub config_dir: PathBuf,
}

/// Values from the command line that win over `config.json`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub agency_id: Option<String>,
    pub page_size: Option<u32>,
}

pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    ProjectDirs::from("gov", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RosterError::Config("Could not determine config dir".to_string()))
}

/// Builds the admin context: an agency id narrows the list to that agency,
/// otherwise the list is sitewide.
pub fn admin_context(config: &RosterConfig) -> AdminContext {
    let context = match &config.agency_id {
        Some(id) => AdminContext::agency(id.clone()),
        None => AdminContext::sitewide(),
    };
    context.with_current_user(config.current_user.clone())
}

pub fn initialize(overrides: Overrides) -> Result<RosterContext> {
    let config_dir = config_dir()?;
    let mut config = RosterConfig::load(&config_dir)?;

    if let Some(url) = overrides.base_url {
        config.set("base-url", &url)?;
    }
    if let Some(agency) = overrides.agency_id {
        config.set("agency-id", &agency)?;
    }
    if let Some(size) = overrides.page_size {
        config.set("page-size", &size.to_string())?;
    }
    debug!(dir = %config_dir.display(), base_url = %config.base_url, "initialized");

    let directory = HttpDirectory::new(&config.base_url)?;
    let api = UserListController::new(directory, admin_context(&config), config.page_size);

    Ok(RosterContext {
        api,
        config,
        config_dir,
    })
}
