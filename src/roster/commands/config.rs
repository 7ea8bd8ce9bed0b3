use crate::commands::{CmdMessage, CmdResult};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
    Unset(String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RosterConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(config_error(e)?));
                return Ok(result);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result.with_config(config))
        }
        ConfigAction::Unset(key) => {
            if let Err(e) = config.unset(&key) {
                result.add_message(CmdMessage::error(config_error(e)?));
                return Ok(result);
            }
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("{} unset", key)));
            Ok(result.with_config(config))
        }
    }
}

/// Validation failures become messages; anything else is a real error.
fn config_error(e: RosterError) -> Result<String> {
    match e {
        RosterError::Config(msg) => Ok(msg),
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn set_persists_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("page-size".into(), "20".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].content, "page-size set to 20");
        assert_eq!(RosterConfig::load(dir.path()).unwrap().page_size, Some(20));
    }

    #[test]
    fn invalid_value_is_an_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("page-size".into(), "lots".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.config.is_none());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_key_and_unset() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("agency-id".into(), "42".into()),
        )
        .unwrap();

        let shown = run(dir.path(), ConfigAction::ShowKey("agency-id".into())).unwrap();
        assert_eq!(shown.messages[0].content, "42");

        run(dir.path(), ConfigAction::Unset("agency-id".into())).unwrap();
        let config = RosterConfig::load(dir.path()).unwrap();
        assert_eq!(config.agency_id, None);
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("theme".into())).unwrap();
        assert_eq!(result.messages[0].content, "Unknown config key: theme");
    }
}
