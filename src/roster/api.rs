//! # API Facade
//!
//! [`UserListController`] is the single entry point for UI clients. It owns
//! the query state (page, filter, page size, scope) and the latest page the
//! server returned, turns user interactions into list requests, and hands back
//! a fresh [`ListView`] every time a page arrives.
//!
//! ## What the Controller Does NOT Do
//!
//! - **Rendering**: it returns view models, never strings.
//! - **Bounds checking**: page numbers past the last page are sent as-is. The
//!   server is the authority on what exists.
//! - **Retries**: a failed request fails the interaction that triggered it.
//!
//! ## Request Ordering
//!
//! Every request gets a [`FetchTicket`] carrying an increasing sequence number.
//! Only the response for the most recently issued ticket is applied; anything
//! older that arrives later is dropped. Hosts that dispatch requests on their
//! own (an async runtime, a worker thread) use [`UserListController::begin_fetch`]
//! and [`UserListController::complete_fetch`]; everyone else calls the
//! synchronous operations, which do both.
//!
//! The query state only moves when a response is applied. A failed request
//! leaves filter and page as they were, so repeating the action retries it.
//! A busy hook installed with [`UserListController::set_busy_hook`] hears
//! every change of [`UserListController::is_busy`].
//!
//! ## Generic Over UserDirectory
//!
//! - Production: `UserListController<HttpDirectory>`
//! - Testing: `UserListController<InMemoryDirectory>`

use crate::commands::{self, fetch, paging, reset, toggle, CmdResult, ListView, ResetTarget};
use crate::confirm::Confirm;
use crate::directory::UserDirectory;
use crate::error::{Result, RosterError};
use crate::model::{AdminContext, ListRequest, QueryState, ResultPage, RowAction, UserRow};
use tracing::debug;

/// Handle for one issued list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: ListRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &ListRequest {
        &self.request
    }
}

/// Called with `true` when a request goes out and `false` once nothing is
/// outstanding.
pub type BusyHook = Box<dyn FnMut(bool)>;

pub struct UserListController<D: UserDirectory> {
    directory: D,
    context: AdminContext,
    state: QueryState,
    latest: Option<ResultPage>,
    issued: u64,
    in_flight: Option<u64>,
    busy_hook: Option<BusyHook>,
}

impl<D: UserDirectory> UserListController<D> {
    /// `page_size` fixes the page size up front; `None` adopts the server's
    /// default from the first response.
    pub fn new(directory: D, context: AdminContext, page_size: Option<u32>) -> Self {
        let state = QueryState::new(context.scope, page_size.filter(|s| *s > 0));
        Self {
            directory,
            context,
            state,
            latest: None,
            issued: 0,
            in_flight: None,
            busy_hook: None,
        }
    }

    pub fn set_busy_hook(&mut self, hook: impl FnMut(bool) + 'static) {
        self.busy_hook = Some(Box::new(hook));
    }

    pub fn context(&self) -> &AdminContext {
        &self.context
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn latest(&self) -> Option<&ResultPage> {
        self.latest.as_ref()
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// True while the most recent request is outstanding. The list should be
    /// hidden behind a busy indicator in the meantime.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn notify_busy(&mut self) {
        let busy = self.is_busy();
        if let Some(hook) = self.busy_hook.as_mut() {
            hook(busy);
        }
    }

    /// View model for the latest page, if one has arrived.
    pub fn view(&self) -> Option<ListView> {
        let page = self.latest.as_ref()?;
        let page_size = self.state.page_size.unwrap_or(page.limit);
        Some(ListView::new(
            page,
            page_size,
            &self.state.filter,
            &self.context,
        ))
    }

    /// Fetches page 1 with the current filter.
    pub fn load(&mut self) -> Result<ListView> {
        let request = paging::initial_request(&self.state);
        self.fetch(request)
    }

    /// Applies a new filter and fetches its first page.
    ///
    /// Returns `Ok(None)` without fetching when the trimmed text equals the
    /// current filter.
    pub fn set_filter(&mut self, text: &str) -> Result<Option<ListView>> {
        match paging::filter_request(&self.state, text) {
            Some(request) => self.fetch(request).map(Some),
            None => Ok(None),
        }
    }

    /// Fetches page `page` of `filter` with a single request, whatever the
    /// current filter is.
    pub fn load_page(&mut self, filter: &str, page: u32) -> Result<ListView> {
        let request = paging::query_request(&self.state, filter, page)?;
        self.fetch(request)
    }

    /// Fetches page `page` with the current filter. Pages past the end are
    /// not clamped.
    pub fn set_page(&mut self, page: u32) -> Result<ListView> {
        let request = paging::page_request(&self.state, page)?;
        self.fetch(request)
    }

    pub fn next_page(&mut self) -> Result<ListView> {
        self.set_page(self.state.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<ListView> {
        self.set_page(self.state.page.saturating_sub(1).max(1))
    }

    /// Issues `request` and applies its response.
    pub fn fetch(&mut self, request: ListRequest) -> Result<ListView> {
        let ticket = self.begin_fetch(request);
        let page = match fetch::run(&mut self.directory, &self.context, ticket.request()) {
            Ok(page) => page,
            Err(e) => {
                self.fail_fetch(&ticket);
                return Err(e);
            }
        };

        self.complete_fetch(&ticket, page)
            .ok_or_else(|| RosterError::Api("Request was superseded".to_string()))
    }

    /// Registers `request` as the newest outstanding request.
    pub fn begin_fetch(&mut self, request: ListRequest) -> FetchTicket {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        debug!(seq = self.issued, ?request, "issuing list request");
        self.notify_busy();
        FetchTicket {
            seq: self.issued,
            request,
        }
    }

    /// Applies the response for `ticket` if it is still the newest request.
    ///
    /// Responses for superseded tickets are discarded and yield `None`.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, page: ResultPage) -> Option<ListView> {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "dropping stale list response"
            );
            return None;
        }

        self.in_flight = None;
        self.notify_busy();
        let page_size = paging::apply_page(&mut self.state, &ticket.request, &page);
        let view = ListView::new(&page, page_size, &self.state.filter, &self.context);
        self.latest = Some(page);
        Some(view)
    }

    /// Marks `ticket` as finished without a page.
    pub fn fail_fetch(&mut self, ticket: &FetchTicket) {
        if self.in_flight == Some(ticket.seq) {
            self.in_flight = None;
            self.notify_busy();
        }
    }

    /// Toggles a row of the current page. See [`toggle::run`] for the
    /// confirmation rules.
    pub fn toggle_row<C: Confirm>(
        &mut self,
        user_id: i64,
        action: RowAction,
        checked: bool,
        confirm: &mut C,
    ) -> Result<CmdResult> {
        let row = self
            .latest
            .as_mut()
            .and_then(|page| page.users.iter_mut().find(|u| u.id == user_id))
            .ok_or_else(|| {
                RosterError::Api(format!("User {} is not on the current page", user_id))
            })?;

        toggle::run(&mut self.directory, row, action, checked, confirm)
    }

    /// Toggles a user that may not be on the current page, such as one named
    /// on the command line. The stored page is updated if it holds the row.
    pub fn toggle_user<C: Confirm>(
        &mut self,
        mut row: UserRow,
        action: RowAction,
        checked: bool,
        confirm: &mut C,
    ) -> Result<CmdResult> {
        let result = toggle::run(&mut self.directory, &mut row, action, checked, confirm)?;

        if let Some(stored) = self
            .latest
            .as_mut()
            .and_then(|page| page.users.iter_mut().find(|u| u.id == row.id))
        {
            *stored = row;
        }
        Ok(result)
    }

    pub fn reset_password<C: Confirm>(
        &mut self,
        target: &ResetTarget,
        confirm: &mut C,
    ) -> Result<CmdResult> {
        reset::run(&mut self.directory, target, confirm)
    }
}

pub use commands::{CmdMessage, MessageLevel, ResetOutcome, ToggleOutcome};
