use super::{ToggleRequest, UserDirectory};
use crate::error::{Result, RosterError};
use crate::model::{AdminContext, ListRequest, ResultPage, UserRow};

pub const DEFAULT_LIMIT: u32 = 10;

/// In-process user directory. Filters and pages a fixed set of rows the way
/// the server does, and records every call it receives.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    users: Vec<UserRow>,
    default_limit: u32,
    reset_failure: Option<(u16, String)>,
    list_failure: Option<(u16, String)>,
    pub list_calls: Vec<(AdminContext, ListRequest)>,
    pub toggles: Vec<ToggleRequest>,
    pub resets: Vec<String>,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            default_limit: DEFAULT_LIMIT,
            reset_failure: None,
            list_failure: None,
            list_calls: Vec::new(),
            toggles: Vec::new(),
            resets: Vec::new(),
        }
    }

    /// Seeds `count` users named `User 1`..`User count`.
    pub fn with_generated_users(count: usize) -> Self {
        let users = (1..=count)
            .map(|i| UserRow::new(i as i64, &format!("User {}", i), &format!("user{}@example.gov", i)))
            .collect();
        Self::new().with_users(users)
    }

    pub fn with_users(mut self, users: Vec<UserRow>) -> Self {
        self.users = users;
        self
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Makes password resets fail with `status` and `body`.
    pub fn failing_resets(mut self, status: u16, body: &str) -> Self {
        self.reset_failure = Some((status, body.to_string()));
        self
    }

    /// Makes list requests fail with `status` and `body` from now on. The
    /// calls are still recorded.
    pub fn fail_lists(&mut self, status: u16, body: &str) {
        self.list_failure = Some((status, body.to_string()));
    }

    pub fn clear_failures(&mut self) {
        self.list_failure = None;
        self.reset_failure = None;
    }

    pub fn user(&self, id: i64) -> Option<&UserRow> {
        self.users.iter().find(|u| u.id == id)
    }
}

impl UserDirectory for InMemoryDirectory {
    fn list_users(&mut self, context: &AdminContext, request: &ListRequest) -> Result<ResultPage> {
        self.list_calls.push((context.clone(), request.clone()));
        if let Some((status, body)) = &self.list_failure {
            return Err(RosterError::Remote {
                status: *status,
                body: body.clone(),
            });
        }

        let needle = request.q.as_deref().unwrap_or("").to_lowercase();
        let matching: Vec<&UserRow> = self
            .users
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || u.username.to_lowercase().contains(&needle)
                    || u.name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .collect();

        let page = request.page.unwrap_or(1).max(1);
        let limit = request.limit.unwrap_or(self.default_limit).max(1);
        let start = (page as usize - 1).saturating_mul(limit as usize);

        Ok(ResultPage {
            users: matching
                .iter()
                .skip(start)
                .take(limit as usize)
                .map(|u| (*u).clone())
                .collect(),
            count: matching.len() as u64,
            page,
            limit,
        })
    }

    fn toggle(&mut self, request: &ToggleRequest) -> Result<()> {
        self.toggles.push(request.clone());
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == request.user_id)
            .ok_or_else(|| RosterError::Remote {
                status: 404,
                body: format!("User {} not found", request.user_id),
            })?;
        request.action.apply(user, request.checked);
        Ok(())
    }

    fn request_password_reset(&mut self, email: &str) -> Result<()> {
        self.resets.push(email.to_string());
        match &self.reset_failure {
            Some((status, body)) => Err(RosterError::Remote {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowAction;

    #[test]
    fn pages_and_filters_like_the_server() {
        let mut dir = InMemoryDirectory::with_generated_users(25);
        let ctx = AdminContext::sitewide();

        let first = dir.list_users(&ctx, &ListRequest::default()).unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.limit, DEFAULT_LIMIT);
        assert_eq!(first.users.len(), 10);
        assert_eq!(first.count, 25);

        let last = dir
            .list_users(
                &ctx,
                &ListRequest {
                    page: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(last.users.len(), 5);

        let filtered = dir
            .list_users(
                &ctx,
                &ListRequest {
                    q: Some("USER2".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        // user2, user20..user25
        assert_eq!(filtered.count, 7);
        assert_eq!(dir.list_calls.len(), 3);
    }

    #[test]
    fn injected_list_failure_is_recorded_and_clears() {
        let mut dir = InMemoryDirectory::with_generated_users(5).with_default_limit(2);
        let ctx = AdminContext::sitewide();

        dir.fail_lists(502, "Bad Gateway");
        let err = dir.list_users(&ctx, &ListRequest::default()).unwrap_err();
        assert!(matches!(err, RosterError::Remote { status: 502, .. }));
        assert_eq!(dir.list_calls.len(), 1);

        dir.clear_failures();
        let page = dir.list_users(&ctx, &ListRequest::default()).unwrap();
        assert_eq!(page.limit, 2);
        assert_eq!(page.users.len(), 2);
    }

    #[test]
    fn toggle_of_unknown_user_is_not_found() {
        let mut dir = InMemoryDirectory::with_generated_users(1);
        let err = dir
            .toggle(&ToggleRequest::new(99, RowAction::Enable, false))
            .unwrap_err();
        assert!(matches!(err, RosterError::Remote { status: 404, .. }));
    }
}
