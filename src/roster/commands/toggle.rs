use crate::commands::{CmdMessage, CmdResult};
use crate::confirm::{Confirm, ConfirmPrompt};
use crate::directory::{ToggleRequest, UserDirectory};
use crate::error::Result;
use crate::model::{RowAction, UserRow};
use tracing::{debug, info};

/// What happened to a row's toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted the change; the control now shows `checked`.
    Applied { checked: bool },
    /// The change was declined before anything was sent; the control goes
    /// back to `reverted_to`.
    Declined { reverted_to: bool },
}

/// The dialog shown before an administrator role is granted or revoked.
pub fn admin_prompt(row: &UserRow, action: RowAction, checked: bool) -> ConfirmPrompt {
    let verb = if checked { "assign" } else { "remove" };
    let target = match action {
        RowAction::AssignAdmin(scope) => scope.label(),
        RowAction::Enable => "account",
    };

    ConfirmPrompt {
        title: format!("Confirm {} administrator", verb),
        body: format!(
            "Are you sure you want to {} {} as {} administrator?",
            verb,
            row.display_name(),
            target
        ),
        primary: if checked { "Assign" } else { "Remove" }.to_string(),
        secondary: "Cancel".to_string(),
    }
}

/// Sets `action`'s flag on `row` to `checked`.
///
/// Administrator changes are confirmed through `confirm` first; account
/// enable/disable is sent straight away. On success `row` is updated to the
/// new value. A declined prompt sends nothing and leaves `row` untouched.
pub fn run<D: UserDirectory, C: Confirm>(
    directory: &mut D,
    row: &mut UserRow,
    action: RowAction,
    checked: bool,
    confirm: &mut C,
) -> Result<CmdResult> {
    let previous = action.current_value(row);

    if action.needs_confirmation() && !confirm.confirm(&admin_prompt(row, action, checked))? {
        debug!(user_id = row.id, ?action, "toggle declined");
        let mut res = CmdResult::default().with_toggle(ToggleOutcome::Declined {
            reverted_to: previous,
        });
        res.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(res);
    }

    let request = ToggleRequest::new(row.id, action, checked);
    directory.toggle(&request)?;
    action.apply(row, checked);
    info!(user_id = row.id, ?action, checked, "toggle applied");

    let mut result = CmdResult::default().with_toggle(ToggleOutcome::Applied { checked });
    result.add_message(CmdMessage::success(describe(row, action, checked)));
    Ok(result)
}

fn describe(row: &UserRow, action: RowAction, checked: bool) -> String {
    match action {
        RowAction::Enable => format!(
            "{} {}",
            if checked { "Enabled" } else { "Disabled" },
            row.display_name()
        ),
        RowAction::AssignAdmin(scope) => format!(
            "{} {} as {} administrator",
            if checked { "Assigned" } else { "Removed" },
            row.display_name(),
            scope
        ),
    }
}
