//! # Rendering Module
//!
//! Styled terminal output from the templates in [`super::templates`].
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they
//! require Unicode-aware processing. Templates pick styles from semantic
//! names and arrange the lines.

use super::styles::{self, names};
use super::templates::TEMPLATES;
use chrono::{DateTime, Utc};
use console::Term;
use minijinja::{Environment, Value};
use roster::api::{CmdMessage, MessageLevel};
use roster::commands::ListView;
use roster::confirm::ConfirmPrompt;
use roster::model::UserRow;
use roster::window::PageEntry;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const ID_WIDTH: usize = 6;
pub const NAME_WIDTH: usize = 24;
pub const USERNAME_WIDTH: usize = 32;
pub const STATUS_WIDTH: usize = 8;
pub const ROLES_WIDTH: usize = 26;
pub const TIME_WIDTH: usize = 14;

#[derive(Serialize)]
struct RowData {
    id: String,
    name: String,
    name_style: &'static str,
    username: String,
    status: String,
    status_style: &'static str,
    roles: String,
    created: String,
}

#[derive(Serialize)]
struct PagerEntryData {
    label: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ListData {
    header: String,
    rows: Vec<RowData>,
    empty_message: String,
    pages: Vec<PagerEntryData>,
    has_previous: bool,
    has_next: bool,
    summary: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

fn environment(use_color: bool) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("style", move |value: Value, name: String| -> String {
        styles::apply(&name, &value.to_string(), use_color)
    });
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

fn render<T: Serialize>(
    name: &str,
    data: &T,
    use_color: Option<bool>,
) -> Result<String, minijinja::Error> {
    let use_color = use_color.unwrap_or_else(|| Term::stdout().features().colors_supported());
    let env = environment(use_color)?;
    env.get_template(name)?.render(data)
}

/// Renders the user table followed by the pager and the row-range summary.
pub fn render_user_list(view: &ListView) -> String {
    render_user_list_internal(view, None)
}

fn render_user_list_internal(view: &ListView, use_color: Option<bool>) -> String {
    let header = format!(
        "{}  {}  {}  {}  {}  {}",
        format!("{:>width$}", "ID", width = ID_WIDTH),
        pad_to_width("Name", NAME_WIDTH),
        pad_to_width("Username", USERNAME_WIDTH),
        pad_to_width("Status", STATUS_WIDTH),
        pad_to_width("Roles", ROLES_WIDTH),
        format!("{:>width$}", "Created", width = TIME_WIDTH),
    );

    let rows = view
        .rows
        .iter()
        .map(|row| RowData {
            id: format!("{:>width$}", row.id, width = ID_WIDTH),
            name: pad_to_width(row.name.as_deref().unwrap_or(""), NAME_WIDTH),
            name_style: if view.is_current_user(row) {
                names::YOU
            } else {
                names::NAME
            },
            username: pad_to_width(&row.username, USERNAME_WIDTH),
            status: pad_to_width(if row.disabled { "disabled" } else { "active" }, STATUS_WIDTH),
            status_style: if row.disabled {
                names::DISABLED
            } else {
                names::ENABLED
            },
            roles: pad_to_width(&roles(row), ROLES_WIDTH),
            created: row.created_at.map(format_time_ago).unwrap_or_default(),
        })
        .collect();

    let pages = view
        .window
        .entries
        .iter()
        .map(|entry| PagerEntryData {
            label: entry.to_string(),
            style: match entry {
                PageEntry::Number(n) if *n == view.window.current_page => names::CURRENT_PAGE,
                PageEntry::Number(_) => names::PAGE,
                PageEntry::Ellipsis => names::ELLIPSIS,
            },
        })
        .collect();

    let data = ListData {
        header,
        rows,
        empty_message: if view.window.total_count == 0 {
            "No users found.".to_string()
        } else {
            "No users on this page.".to_string()
        },
        pages,
        has_previous: view.window.has_previous(),
        has_next: view.window.has_next(),
        summary: summary(view),
    };

    render("user_list", &data, use_color).unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn summary(view: &ListView) -> String {
    let w = &view.window;
    let matching = if view.filter.is_empty() {
        String::new()
    } else {
        format!(" matching \"{}\"", view.filter)
    };

    if w.total_count == 0 {
        format!("0 users{}", matching)
    } else if w.shown == 0 {
        format!(
            "Page {} of {} is empty ({} users{})",
            w.current_page, w.number_of_pages, w.total_count, matching
        )
    } else {
        format!(
            "Showing {}–{} of {}{}",
            w.first_index, w.last_index, w.total_count, matching
        )
    }
}

fn roles(row: &UserRow) -> String {
    let mut roles = Vec::new();
    if row.is_admin {
        roles.push("admin");
    }
    if row.is_agency_admin {
        roles.push("agency admin");
    }
    if row.is_community_admin {
        roles.push("community admin");
    }

    if roles.is_empty() {
        "-".to_string()
    } else {
        roles.join(", ")
    }
}

/// Renders a confirmation prompt's title and body. The buttons are drawn by
/// the terminal prompt itself.
pub fn render_prompt(prompt: &ConfirmPrompt) -> String {
    #[derive(Serialize)]
    struct PromptData<'a> {
        title: &'a str,
        body: &'a str,
    }

    let data = PromptData {
        title: &prompt.title,
        body: &prompt.body,
    };
    render("prompt", &data, None)
        .unwrap_or_else(|_| format!("{}\n{}\n", prompt.title, prompt.body))
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    render_text_list_internal(lines, empty_message, None)
}

fn render_text_list_internal(
    lines: &[String],
    empty_message: &str,
    use_color: Option<bool>,
) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };

    render("text_list", &data, use_color).unwrap_or_else(|_| format!("{}\n", empty_message))
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], use_color: Option<bool>) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render("messages", &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

/// Prints command messages to stdout using the template system.
pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Truncates to `width` columns (marking the cut with `…`) and pads with
/// spaces up to `width`.
fn pad_to_width(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use roster::model::{AdminContext, ResultPage};

    fn view_of(users: Vec<UserRow>, page: u32, count: u64, filter: &str) -> ListView {
        let result = ResultPage {
            users,
            count,
            page,
            limit: 10,
        };
        let ctx = AdminContext::sitewide().with_current_user(Some("ada@example.gov".into()));
        ListView::new(&result, 10, filter, &ctx)
    }

    fn rows(n: i64) -> Vec<UserRow> {
        (1..=n)
            .map(|i| UserRow::new(i, &format!("User {}", i), &format!("user{}@example.gov", i)))
            .collect()
    }

    #[test]
    fn test_render_rows_and_summary() {
        let output = render_user_list_internal(&view_of(rows(10), 1, 95, ""), Some(false));

        assert!(output.starts_with("    ID  Name"));
        assert!(output.contains("user3@example.gov"));
        assert!(output.contains("active"));
        assert!(output.contains("1 2 3 4 5 … 10"));
        assert!(output.contains("Showing 1–10 of 95"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_render_middle_page_window() {
        let output = render_user_list_internal(&view_of(rows(10), 5, 95, ""), Some(false));
        assert!(output.contains("‹ p  1 … 4 5 6 … 10  n ›"));
        assert!(output.contains("Showing 41–50 of 95"));
    }

    #[test]
    fn test_pager_hints_stop_at_the_ends() {
        let first = render_user_list_internal(&view_of(rows(10), 1, 95, ""), Some(false));
        assert!(!first.contains("‹ p"));
        assert!(first.contains("n ›"));

        let last = render_user_list_internal(&view_of(rows(5), 10, 95, ""), Some(false));
        assert!(last.contains("‹ p"));
        assert!(!last.contains("n ›"));
    }

    #[test]
    fn test_render_empty_result() {
        let output = render_user_list_internal(&view_of(Vec::new(), 1, 0, "zed"), Some(false));
        assert!(output.contains("No users found."));
        assert!(output.contains("0 users matching \"zed\""));
        assert!(!output.contains("ID"));
    }

    #[test]
    fn test_render_page_past_the_end() {
        let output = render_user_list_internal(&view_of(Vec::new(), 50, 30, ""), Some(false));
        assert!(output.contains("No users on this page."));
        assert!(output.contains("Page 50 of 3 is empty (30 users)"));
    }

    #[test]
    fn test_render_flags_and_roles() {
        let mut users = rows(2);
        users[0].disabled = true;
        users[1].is_admin = true;
        users[1].is_community_admin = true;
        users[1].created_at = Some(Utc::now() - Duration::days(3));

        let output = render_user_list_internal(&view_of(users, 1, 2, ""), Some(false));
        assert!(output.contains("disabled"));
        assert!(output.contains("admin, community admin"));
        assert!(output.contains("3 days ago"));
    }

    #[test]
    fn test_current_page_is_styled_with_color() {
        let output = render_user_list_internal(&view_of(rows(10), 2, 95, ""), Some(true));
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("User 2"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_to_width("much too long", 6), "much …");
        assert_eq!(pad_to_width("ab", 4), "ab  ");
    }

    #[test]
    fn test_render_text_list() {
        let lines = vec!["base-url = http://localhost:3000".to_string()];
        let output = render_text_list_internal(&lines, "Nothing here.", Some(false));
        assert_eq!(output, "base-url = http://localhost:3000\n");

        let empty = render_text_list_internal(&[], "Nothing here.", Some(false));
        assert_eq!(empty, "Nothing here.\n");
    }

    #[test]
    fn test_render_messages() {
        assert!(render_messages_internal(&[], Some(false)).is_empty());

        let messages = vec![
            CmdMessage::success("Enabled Ada"),
            CmdMessage::error("Nope"),
        ];
        let output = render_messages_internal(&messages, Some(false));
        assert_eq!(output, "Enabled Ada\nNope\n");
    }
}
