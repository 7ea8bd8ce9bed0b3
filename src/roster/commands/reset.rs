use crate::commands::{CmdMessage, CmdResult};
use crate::confirm::{Confirm, ConfirmPrompt};
use crate::directory::UserDirectory;
use crate::error::{Result, RosterError};
use tracing::{info, warn};

pub const RESET_FAILED: &str = "There was an error sending the Reset password email.";

/// Whose password to reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTarget {
    pub name: String,
    pub email: String,
}

impl ResetTarget {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Sent,
    Declined,
    /// The server refused; `detail` is the message parsed from its response.
    Failed { detail: Option<String> },
}

pub fn prompt(target: &ResetTarget) -> ConfirmPrompt {
    ConfirmPrompt {
        title: "Reset Password".to_string(),
        body: format!(
            "Click Send email below to send an email to {} to reset their password.",
            target.name
        ),
        primary: "Send email".to_string(),
        secondary: "Close".to_string(),
    }
}

/// Sends the reset email for `target` once the prompt is accepted.
///
/// A refusal from the server is reported in the result rather than returned
/// as an error; transport failures still propagate.
pub fn run<D: UserDirectory, C: Confirm>(
    directory: &mut D,
    target: &ResetTarget,
    confirm: &mut C,
) -> Result<CmdResult> {
    if !confirm.confirm(&prompt(target))? {
        let mut result = CmdResult::default().with_reset(ResetOutcome::Declined);
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    match directory.request_password_reset(&target.email) {
        Ok(()) => {
            info!(email = %target.email, "password reset email requested");
            let mut result = CmdResult::default().with_reset(ResetOutcome::Sent);
            result.add_message(CmdMessage::success(format!(
                "Password reset email sent to {}",
                target.email
            )));
            Ok(result)
        }
        Err(RosterError::Remote { status, body }) => {
            let detail = parse_error_message(&body);
            warn!(status, ?detail, "password reset refused");

            let mut result =
                CmdResult::default().with_reset(ResetOutcome::Failed { detail: detail.clone() });
            result.add_message(CmdMessage::error(match &detail {
                Some(d) => format!("{} {}", RESET_FAILED, d),
                None => RESET_FAILED.to_string(),
            }));
            Ok(result)
        }
        Err(e) => Err(e),
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// JSON bodies yield their `message` (or `error`) string field; anything else
/// that is not blank is used as-is.
pub fn parse_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::ScriptedConfirm;
    use crate::directory::memory::InMemoryDirectory;

    fn target() -> ResetTarget {
        ResetTarget::new("Ada Lovelace", "ada@example.gov")
    }

    #[test]
    fn accepted_prompt_sends_reset() {
        let mut dir = InMemoryDirectory::new();
        let mut confirm = ScriptedConfirm::new([true]);

        let result = run(&mut dir, &target(), &mut confirm).unwrap();

        assert_eq!(result.reset, Some(ResetOutcome::Sent));
        assert_eq!(dir.resets, vec!["ada@example.gov".to_string()]);
        assert_eq!(confirm.asked[0].title, "Reset Password");
        assert!(confirm.asked[0].body.contains("Ada Lovelace"));
        assert_eq!(confirm.asked[0].primary, "Send email");
    }

    #[test]
    fn declined_prompt_sends_nothing() {
        let mut dir = InMemoryDirectory::new();
        let result = run(&mut dir, &target(), &mut ScriptedConfirm::new([false])).unwrap();

        assert_eq!(result.reset, Some(ResetOutcome::Declined));
        assert_eq!(result.messages[0].content, "Operation cancelled.");
        assert!(dir.resets.is_empty());
    }

    #[test]
    fn server_refusal_is_reported_inline() {
        let mut dir = InMemoryDirectory::new().failing_resets(400, r#"{"message":"Unknown user"}"#);
        let result = run(&mut dir, &target(), &mut ScriptedConfirm::new([true])).unwrap();

        assert_eq!(
            result.reset,
            Some(ResetOutcome::Failed {
                detail: Some("Unknown user".to_string())
            })
        );
        assert_eq!(
            result.messages[0].content,
            format!("{} Unknown user", RESET_FAILED)
        );
    }

    #[test]
    fn parses_error_bodies() {
        assert_eq!(
            parse_error_message(r#"{"error":"locked"}"#).as_deref(),
            Some("locked")
        );
        assert_eq!(parse_error_message(r#"{"code":3}"#), None);
        assert_eq!(parse_error_message("  "), None);
        assert_eq!(
            parse_error_message("Bad Gateway").as_deref(),
            Some("Bad Gateway")
        );
    }
}
