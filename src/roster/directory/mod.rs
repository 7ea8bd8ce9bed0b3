//! # Directory Layer
//!
//! The user directory is the server side of the admin user list: it answers
//! list queries, applies row toggles and sends password-reset emails. The
//! [`UserDirectory`] trait keeps the controller independent of how that server
//! is reached.
//!
//! ## Implementations
//!
//! - [`http::HttpDirectory`]: talks to the platform's HTTP API.
//! - [`memory::InMemoryDirectory`]: an in-process fake that filters and pages a
//!   fixed set of rows and records every call, for tests.
//!
//! ## Routes
//!
//! ```text
//! GET  /api/admin/users[/{scope_id}]?page=&q=&limit=   list query
//! GET  /api/user/{enable|disable}/{id}                 account toggle
//! GET  /api/admin/admin/{id}?action={bool}             sitewide admin toggle
//! GET  /api/admin/agencyAdmin/{id}?action={bool}       agency admin toggle
//! GET  /api/admin/communityAdmin/{id}?action={bool}    community admin toggle
//! POST /api/auth/forgot  (username=<email>)            password reset
//! ```

use crate::error::Result;
use crate::model::{AdminContext, ListRequest, ResultPage, RowAction, Scope};

pub mod http;
pub mod memory;

pub const USERS_PATH: &str = "/api/admin/users";
pub const RESET_PATH: &str = "/api/auth/forgot";

/// A single row toggle to send to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    pub user_id: i64,
    pub action: RowAction,
    /// The value the flag should have after the toggle.
    pub checked: bool,
}

impl ToggleRequest {
    pub fn new(user_id: i64, action: RowAction, checked: bool) -> Self {
        Self {
            user_id,
            action,
            checked,
        }
    }

    /// Path (with query string) of the endpoint that applies this toggle.
    pub fn path(&self) -> String {
        let id = self.user_id;
        match self.action {
            RowAction::Enable => {
                let verb = if self.checked { "enable" } else { "disable" };
                format!("/api/user/{}/{}", verb, id)
            }
            RowAction::AssignAdmin(scope) => {
                let resource = match scope {
                    Scope::Sitewide => "admin",
                    Scope::Agencies => "agencyAdmin",
                    Scope::Community => "communityAdmin",
                };
                format!("/api/admin/{}/{}?action={}", resource, id, self.checked)
            }
        }
    }
}

/// List path for the context: the base path, or the base path plus the scope id.
pub fn list_path(context: &AdminContext) -> String {
    match context.scope_id.as_deref() {
        Some(id) if !id.is_empty() => format!("{}/{}", USERS_PATH, id),
        _ => USERS_PATH.to_string(),
    }
}

/// Abstract interface to the server that owns the user list.
pub trait UserDirectory {
    /// Fetch one page of users for `context`.
    fn list_users(&mut self, context: &AdminContext, request: &ListRequest) -> Result<ResultPage>;

    /// Apply a row toggle. The response body is not consumed.
    fn toggle(&mut self, request: &ToggleRequest) -> Result<()>;

    /// Ask the server to email a password-reset link to `email`.
    fn request_password_reset(&mut self, email: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_paths_follow_action() {
        let cases = [
            (RowAction::Enable, true, "/api/user/enable/12"),
            (RowAction::Enable, false, "/api/user/disable/12"),
            (
                RowAction::AssignAdmin(Scope::Sitewide),
                true,
                "/api/admin/admin/12?action=true",
            ),
            (
                RowAction::AssignAdmin(Scope::Agencies),
                false,
                "/api/admin/agencyAdmin/12?action=false",
            ),
            (
                RowAction::AssignAdmin(Scope::Community),
                true,
                "/api/admin/communityAdmin/12?action=true",
            ),
        ];

        for (action, checked, expected) in cases {
            assert_eq!(ToggleRequest::new(12, action, checked).path(), expected);
        }
    }

    #[test]
    fn list_path_appends_scope_id() {
        assert_eq!(list_path(&AdminContext::sitewide()), "/api/admin/users");
        assert_eq!(
            list_path(&AdminContext::agency("42")),
            "/api/admin/users/42"
        );
    }
}
