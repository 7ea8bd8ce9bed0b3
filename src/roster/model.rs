use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The organizational boundary a list or an administrator toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Scope {
    #[default]
    Sitewide,
    Agencies,
    Community,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Sitewide => "Sitewide",
            Scope::Agencies => "Agencies",
            Scope::Community => "Community",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sitewide" => Ok(Scope::Sitewide),
            "agencies" | "agency" => Ok(Scope::Agencies),
            "community" => Ok(Scope::Community),
            other => Err(format!("Unknown scope: {}", other)),
        }
    }
}

/// Who is looking at the list and which boundary the list is scoped to.
///
/// Handed to the controller at construction instead of being looked up from
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminContext {
    pub scope: Scope,
    /// Agency (or community) id for scoped lists. `None` for sitewide.
    pub scope_id: Option<String>,
    /// Username of the signed-in administrator, if known.
    pub current_user: Option<String>,
}

impl AdminContext {
    pub fn sitewide() -> Self {
        Self::default()
    }

    pub fn agency(agency_id: impl Into<String>) -> Self {
        Self {
            scope: Scope::Agencies,
            scope_id: Some(agency_id.into()),
            current_user: None,
        }
    }

    pub fn with_current_user(mut self, username: Option<String>) -> Self {
        self.current_user = username;
        self
    }
}

/// One row of the user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_agency_admin: bool,
    #[serde(default)]
    pub is_community_admin: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserRow {
    pub fn new(id: i64, name: &str, username: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            username: username.to_string(),
            disabled: false,
            is_admin: false,
            is_agency_admin: false,
            is_community_admin: false,
            created_at: None,
        }
    }

    /// Name to show in prompts, falling back to the username.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    /// Whether the row holds the administrator role for `scope`.
    pub fn is_admin_for(&self, scope: Scope) -> bool {
        match scope {
            Scope::Sitewide => self.is_admin,
            Scope::Agencies => self.is_agency_admin,
            Scope::Community => self.is_community_admin,
        }
    }

    pub fn set_admin_for(&mut self, scope: Scope, value: bool) {
        match scope {
            Scope::Sitewide => self.is_admin = value,
            Scope::Agencies => self.is_agency_admin = value,
            Scope::Community => self.is_community_admin = value,
        }
    }
}

/// The boolean flag a row toggle changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    /// Enable or disable the account.
    Enable,
    /// Grant or revoke the administrator role for a scope.
    AssignAdmin(Scope),
}

impl RowAction {
    /// Administrator changes are confirmed before they are sent.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, RowAction::AssignAdmin(_))
    }

    /// Current value of the flag this action controls on `row`.
    pub fn current_value(&self, row: &UserRow) -> bool {
        match self {
            RowAction::Enable => !row.disabled,
            RowAction::AssignAdmin(scope) => row.is_admin_for(*scope),
        }
    }

    /// Writes `checked` back onto `row`.
    pub fn apply(&self, row: &mut UserRow, checked: bool) {
        match self {
            RowAction::Enable => row.disabled = !checked,
            RowAction::AssignAdmin(scope) => row.set_admin_for(*scope, checked),
        }
    }
}

/// One page of the user list as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub users: Vec<UserRow>,
    /// Total number of matching users across all pages.
    pub count: u64,
    pub page: u32,
    /// Page size the server applied.
    pub limit: u32,
}

/// Parameters of a list-query request. Omitted values are defaulted by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub page: Option<u32>,
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl ListRequest {
    /// Query pairs in wire order, skipping the parameters left unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// The controller's current query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub filter: String,
    /// Fixed once established, either by configuration or by the first response.
    pub page_size: Option<u32>,
    pub scope: Scope,
}

impl QueryState {
    pub fn new(scope: Scope, page_size: Option<u32>) -> Self {
        Self {
            page: 1,
            filter: String::new(),
            page_size,
            scope,
        }
    }
}
