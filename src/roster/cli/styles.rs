//! Named styles for roster's terminal output.
//!
//! Templates refer to styles by semantic name (`username`, `current_page`)
//! through the `style` filter; this module maps those names to `console`
//! styles. Unknown names render as plain text.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const HEADER: &str = "header";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const YOU: &str = "you";
    pub const USERNAME: &str = "username";
    pub const ENABLED: &str = "enabled";
    pub const DISABLED: &str = "disabled";
    pub const ROLES: &str = "roles";
    pub const TIME: &str = "time";
    pub const PAGE: &str = "page";
    pub const CURRENT_PAGE: &str = "current_page";
    pub const ELLIPSIS: &str = "ellipsis";
    pub const SUMMARY: &str = "summary";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
    pub const TITLE: &str = "title";
}

pub static ROSTER_THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    let muted = Style::new().color256(246);

    HashMap::from([
        (names::HEADER, Style::new().bold().underlined()),
        (names::ID, Style::new().yellow()),
        (names::NAME, Style::new()),
        (names::YOU, Style::new().cyan().bold()),
        (names::USERNAME, Style::new()),
        (names::ENABLED, Style::new().green()),
        (names::DISABLED, Style::new().red()),
        (names::ROLES, Style::new().magenta()),
        (names::TIME, muted.clone().italic()),
        (names::PAGE, Style::new()),
        (names::CURRENT_PAGE, Style::new().black().on_yellow().bold()),
        (names::ELLIPSIS, muted.clone()),
        (names::SUMMARY, muted),
        (names::INFO, Style::new().dim()),
        (names::SUCCESS, Style::new().green()),
        (names::WARNING, Style::new().yellow()),
        (names::ERROR, Style::new().red()),
        (names::TITLE, Style::new().bold()),
    ])
});

/// Applies the named style to `text`, or returns it unchanged when color is
/// off or the name is not in the theme.
pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match ROSTER_THEME.get(name) {
        Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_returns_text() {
        assert_eq!(apply(names::ERROR, "boom", false), "boom");
    }

    #[test]
    fn color_mode_wraps_in_ansi() {
        let styled = apply(names::ERROR, "boom", true);
        assert!(styled.contains("boom"));
        assert!(styled.contains("\u{1b}["));
    }

    #[test]
    fn unknown_style_is_plain() {
        assert_eq!(apply("sparkles", "hi", true), "hi");
    }
}
