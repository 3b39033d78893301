//! Cursor pagination.

use serde::Deserialize;
use serde_json::Value;

use crate::client::GraphClient;
use crate::error::GraphResult;
use crate::request::PreparedRequest;
use crate::types::Page;

/// Lazy walker over a cursor-paginated GET.
///
/// Each [`next_page`](Self::next_page) call performs at most one network
/// round trip; nothing is prefetched, so consuming only the first page
/// costs exactly one request. The sequence is single-pass and stopping is
/// just dropping the pager; there is never an outstanding request to
/// cancel.
#[derive(Debug)]
pub struct Pager<'a> {
    client: &'a GraphClient,
    state: State,
    retry: Option<u32>,
}

#[derive(Debug)]
enum State {
    /// First request, not yet sent
    Initial(PreparedRequest),
    /// Cursor URL of the page after the one last yielded
    HasNext(String),
    Exhausted,
}

impl<'a> Pager<'a> {
    pub(crate) fn new(client: &'a GraphClient, request: PreparedRequest) -> Self {
        let retry = request.retry;
        Self {
            client,
            state: State::Initial(request),
            retry,
        }
    }

    /// Whether another [`next_page`](Self::next_page) call may yield a page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !matches!(self.state, State::Exhausted)
    }

    /// Fetch and yield the next page, or `None` once the cursor chain ends.
    ///
    /// Cursor URLs are fetched verbatim; the API signs them itself, so no
    /// credential is re-injected.
    ///
    /// # Errors
    /// Surfaces the underlying call failure; the sequence counts as
    /// exhausted afterwards.
    pub async fn next_page(&mut self) -> GraphResult<Option<Value>> {
        let request = match std::mem::replace(&mut self.state, State::Exhausted) {
            State::Initial(request) => request,
            State::HasNext(url) => {
                let mut request = self.client.builder().next_page(&url);
                request.retry = self.retry;
                request
            }
            State::Exhausted => return Ok(None),
        };

        let page = self.client.execute(request).await?;

        if let Some(next) = next_cursor(&page) {
            self.state = State::HasNext(next);
        }

        Ok(Some(page))
    }
}

/// Extract `paging.next` from a decoded page.
fn next_cursor(page: &Value) -> Option<String> {
    Page::deserialize(page)
        .ok()
        .and_then(|page| page.paging)
        .and_then(|paging| paging.next)
}
