use crate::directory::UserDirectory;
use crate::error::Result;
use crate::model::{AdminContext, ListRequest, ResultPage};
use tracing::{debug, warn};

pub fn run<D: UserDirectory>(
    directory: &mut D,
    context: &AdminContext,
    request: &ListRequest,
) -> Result<ResultPage> {
    let page = directory.list_users(context, request)?;

    if page.users.len() > page.limit as usize {
        warn!(
            rows = page.users.len(),
            limit = page.limit,
            "server returned more rows than its page size"
        );
    }
    debug!(
        page = page.page,
        rows = page.users.len(),
        count = page.count,
        "received user page"
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::memory::InMemoryDirectory;

    #[test]
    fn forwards_context_and_request() {
        let mut dir = InMemoryDirectory::with_generated_users(3);
        let ctx = AdminContext::agency("12");
        let req = ListRequest {
            page: Some(1),
            q: Some("user3".into()),
            limit: None,
        };

        let page = run(&mut dir, &ctx, &req).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(dir.list_calls, vec![(ctx, req)]);
    }
}
