//! Query-state transitions for the user list.
//!
//! Each user interaction turns into at most one list request. Nothing here
//! clamps page numbers: the server decides what an out-of-range page returns.

use crate::error::{Result, RosterError};
use crate::model::{ListRequest, QueryState, ResultPage};
use tracing::debug;

fn filter_param(filter: &str) -> Option<String> {
    if filter.is_empty() {
        None
    } else {
        Some(filter.to_string())
    }
}

/// The first request of a controller: page 1 with the current filter.
pub fn initial_request(state: &QueryState) -> ListRequest {
    ListRequest {
        page: Some(1),
        q: filter_param(&state.filter),
        limit: state.page_size,
    }
}

/// Returns the page-1 request for a new filter.
///
/// The text is trimmed first. Returns `None` when the trimmed text equals the
/// applied filter, so repeated keystrokes that leave the value unchanged do not
/// refetch. The state is untouched: the filter takes effect when its response
/// arrives, see [`apply_page`].
pub fn filter_request(state: &QueryState, text: &str) -> Option<ListRequest> {
    let text = text.trim();
    if text == state.filter {
        debug!(filter = text, "filter unchanged, skipping fetch");
        return None;
    }

    Some(ListRequest {
        page: Some(1),
        q: filter_param(text),
        limit: state.page_size,
    })
}

/// Request for `page` under `filter` in one round trip.
pub fn query_request(state: &QueryState, filter: &str, page: u32) -> Result<ListRequest> {
    if page == 0 {
        return Err(RosterError::Api("Page numbers start at 1".to_string()));
    }

    Ok(ListRequest {
        page: Some(page),
        q: filter_param(filter.trim()),
        limit: state.page_size,
    })
}

/// Request for page `page`, keeping the current filter.
pub fn page_request(state: &QueryState, page: u32) -> Result<ListRequest> {
    query_request(state, &state.filter, page)
}

/// Folds the response to `request` into the state and returns the page size
/// in effect.
///
/// The request's filter and the returned page become current. The first
/// response with a non-zero limit establishes the page size when none was
/// configured; later responses never change it.
pub fn apply_page(state: &mut QueryState, request: &ListRequest, page: &ResultPage) -> u32 {
    state.filter = request.q.clone().unwrap_or_default();
    state.page = page.page.max(1);
    if state.page_size.is_none() && page.limit > 0 {
        state.page_size = Some(page.limit);
    }
    state.page_size.unwrap_or(page.limit)
}
