use super::render::render_prompt;
use dialoguer::console::Term;
use dialoguer::Select;
use roster::confirm::{AutoConfirm, Confirm, ConfirmPrompt};
use roster::error::{Result, RosterError};

/// Asks on stderr with a two-item menu: the primary label first, the
/// secondary second. Escape counts as declining.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool> {
        let term = Term::stderr();
        term.write_str(&render_prompt(prompt))?;

        let choice = Select::new()
            .items(&[&prompt.primary, &prompt.secondary])
            .default(0)
            .interact_on_opt(&term)
            .map_err(prompt_error)?;

        Ok(choice == Some(0))
    }
}

/// `--yes` skips the terminal entirely.
pub fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(TerminalConfirm)
    }
}

pub fn prompt_error(e: dialoguer::Error) -> RosterError {
    RosterError::Io(std::io::Error::other(e))
}
