//! The interactive pager behind `roster browse`.
//!
//! One controller lives for the whole session so the page size found on the
//! first response, the filter and the scope carry across commands.

use super::prompt::{prompt_error, TerminalConfirm};
use super::render::{print_messages, render_user_list};
use super::styles::{self, names};
use dialoguer::console::Term;
use dialoguer::Input;
use roster::api::{CmdMessage, UserListController};
use roster::commands::{ListView, ResetTarget};
use roster::directory::UserDirectory;
use roster::error::{Result, RosterError};
use roster::model::{RowAction, Scope};

const PROMPT: &str = "n/p/<page>//filter/e|d|a|u|r <id>/q";

const BUSY: &str = "Loading users…";

const HELP: &str = "\
  n, <enter>   next page
  p            previous page
  <number>     jump to page
  /text        filter by name or username (/ alone clears)
  e <id>       enable account
  d <id>       disable account
  a <id>       assign administrator
  u <id>       remove administrator
  r <id>       send password reset email
  q            quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Next,
    Previous,
    Page(u32),
    Filter(String),
    Toggle {
        user_id: i64,
        action: RowAction,
        checked: bool,
    },
    Reset(i64),
    Help,
    Quit,
    Unknown(String),
}

/// Parses one line of browse input. Administrator toggles apply to `scope`.
pub fn parse_input(line: &str, scope: Scope) -> BrowseInput {
    let line = line.trim();

    if let Some(text) = line.strip_prefix('/') {
        return BrowseInput::Filter(text.to_string());
    }
    if let Ok(page) = line.parse::<u32>() {
        return BrowseInput::Page(page);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("");
    let user_id = parts.next().and_then(|id| id.parse::<i64>().ok());
    if parts.next().is_some() {
        return BrowseInput::Unknown(line.to_string());
    }

    let toggle = |action, checked| match user_id {
        Some(user_id) => BrowseInput::Toggle {
            user_id,
            action,
            checked,
        },
        None => BrowseInput::Unknown(line.to_string()),
    };

    match verb {
        "" | "n" => BrowseInput::Next,
        "p" => BrowseInput::Previous,
        "q" | "quit" => BrowseInput::Quit,
        "?" | "h" | "help" => BrowseInput::Help,
        "e" => toggle(RowAction::Enable, true),
        "d" => toggle(RowAction::Enable, false),
        "a" => toggle(RowAction::AssignAdmin(scope), true),
        "u" => toggle(RowAction::AssignAdmin(scope), false),
        "r" => match user_id {
            Some(id) => BrowseInput::Reset(id),
            None => BrowseInput::Unknown(line.to_string()),
        },
        _ => BrowseInput::Unknown(line.to_string()),
    }
}

/// Draws the busy line on stderr while a request is out and erases it once
/// the response is in.
fn busy_indicator(term: Term) -> impl FnMut(bool) {
    let use_color = term.features().colors_supported();
    move |busy| {
        let _ = if busy {
            term.write_str(&styles::apply(names::INFO, BUSY, use_color))
        } else {
            term.clear_line()
        };
    }
}

pub fn run<D: UserDirectory>(
    api: &mut UserListController<D>,
    filter: Option<String>,
) -> Result<()> {
    api.set_busy_hook(busy_indicator(Term::stderr()));

    let mut view = api.load_page(filter.as_deref().unwrap_or(""), 1)?;
    print!("{}", render_user_list(&view));

    loop {
        let line: String = Input::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        let input = parse_input(&line, api.context().scope);
        if input == BrowseInput::Quit {
            return Ok(());
        }

        match step(api, &view, input) {
            Ok(Some(next)) => {
                view = next;
                print!("{}", render_user_list(&view));
            }
            Ok(None) => {}
            Err(e) => print_messages(&[CmdMessage::error(e.to_string())]),
        }
    }
}

/// Carries out one parsed command. `Some` is a view to redraw.
fn step<D: UserDirectory>(
    api: &mut UserListController<D>,
    view: &ListView,
    input: BrowseInput,
) -> Result<Option<ListView>> {
    match input {
        BrowseInput::Next => api.next_page().map(Some),
        BrowseInput::Previous => api.previous_page().map(Some),
        BrowseInput::Page(page) => api.set_page(page).map(Some),
        BrowseInput::Filter(text) => {
            let next = api.set_filter(&text)?;
            if next.is_none() {
                print_messages(&[CmdMessage::info("Filter unchanged.")]);
            }
            Ok(next)
        }
        BrowseInput::Toggle {
            user_id,
            action,
            checked,
        } => {
            let result = api.toggle_row(user_id, action, checked, &mut TerminalConfirm)?;
            print_messages(&result.messages);
            Ok(api.view())
        }
        BrowseInput::Reset(user_id) => {
            let row = view
                .rows
                .iter()
                .find(|row| row.id == user_id)
                .ok_or_else(|| {
                    RosterError::Api(format!("User {} is not on the current page", user_id))
                })?;
            let target = ResetTarget::new(row.display_name(), row.username.clone());
            let result = api.reset_password(&target, &mut TerminalConfirm)?;
            print_messages(&result.messages);
            Ok(None)
        }
        BrowseInput::Help => {
            println!("{}", HELP);
            Ok(None)
        }
        BrowseInput::Unknown(text) => {
            print_messages(&[CmdMessage::warning(format!(
                "Unknown command: {} (? for help)",
                text
            ))]);
            Ok(None)
        }
        BrowseInput::Quit => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paging_and_filters() {
        assert_eq!(parse_input("", Scope::Sitewide), BrowseInput::Next);
        assert_eq!(parse_input(" n ", Scope::Sitewide), BrowseInput::Next);
        assert_eq!(parse_input("p", Scope::Sitewide), BrowseInput::Previous);
        assert_eq!(parse_input("12", Scope::Sitewide), BrowseInput::Page(12));
        assert_eq!(
            parse_input("/ada love", Scope::Sitewide),
            BrowseInput::Filter("ada love".to_string())
        );
        assert_eq!(
            parse_input("/", Scope::Sitewide),
            BrowseInput::Filter(String::new())
        );
        assert_eq!(parse_input("q", Scope::Sitewide), BrowseInput::Quit);
    }

    #[test]
    fn parses_row_commands_in_scope() {
        assert_eq!(
            parse_input("a 42", Scope::Agencies),
            BrowseInput::Toggle {
                user_id: 42,
                action: RowAction::AssignAdmin(Scope::Agencies),
                checked: true,
            }
        );
        assert_eq!(
            parse_input("d 7", Scope::Sitewide),
            BrowseInput::Toggle {
                user_id: 7,
                action: RowAction::Enable,
                checked: false,
            }
        );
        assert_eq!(parse_input("r 3", Scope::Sitewide), BrowseInput::Reset(3));
    }

    #[test]
    fn rejects_malformed_row_commands() {
        assert!(matches!(
            parse_input("e", Scope::Sitewide),
            BrowseInput::Unknown(_)
        ));
        assert!(matches!(
            parse_input("e x", Scope::Sitewide),
            BrowseInput::Unknown(_)
        ));
        assert!(matches!(
            parse_input("e 1 2", Scope::Sitewide),
            BrowseInput::Unknown(_)
        ));
        assert!(matches!(
            parse_input("zap", Scope::Sitewide),
            BrowseInput::Unknown(_)
        ));
    }
}
