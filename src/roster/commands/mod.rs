use crate::config::RosterConfig;
use crate::model::{AdminContext, ResultPage, Scope, UserRow};
use crate::window::PageWindow;

pub mod config;
pub mod fetch;
pub mod paging;
pub mod reset;
pub mod toggle;

pub use reset::{ResetOutcome, ResetTarget};
pub use toggle::ToggleOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub toggle: Option<ToggleOutcome>,
    pub reset: Option<ResetOutcome>,
    pub config: Option<RosterConfig>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_toggle(mut self, outcome: ToggleOutcome) -> Self {
        self.toggle = Some(outcome);
        self
    }

    pub fn with_reset(mut self, outcome: ResetOutcome) -> Self {
        self.reset = Some(outcome);
        self
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// The read-only view model handed to a renderer after each page arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub rows: Vec<UserRow>,
    pub window: PageWindow,
    pub filter: String,
    pub scope: Scope,
    pub page_size: u32,
    pub current_user: Option<String>,
}

impl ListView {
    pub fn new(page: &ResultPage, page_size: u32, filter: &str, context: &AdminContext) -> Self {
        Self {
            rows: page.users.clone(),
            window: PageWindow::for_page(page, page_size),
            filter: filter.to_string(),
            scope: context.scope,
            page_size,
            current_user: context.current_user.clone(),
        }
    }

    /// Whether `row` is the signed-in administrator's own account.
    pub fn is_current_user(&self, row: &UserRow) -> bool {
        self.current_user
            .as_deref()
            .is_some_and(|u| u.eq_ignore_ascii_case(&row.username))
    }
}
