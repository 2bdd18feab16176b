//! State of one paginated remote list: the parameters of the next read and
//! the last page the server returned.

use std::future::Future;

use crate::api::PageRequest;
use crate::api::errors::ApiResult;
use crate::domain::types::ScheduleRange;
use crate::dto::api::PageEnvelope;
use crate::pagination::PageResult;
use crate::query::QueryParams;

/// Handle for one in-flight read, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: PageRequest,
}

/// What happened to a response handed to [`ListView::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page replaced the previous one.
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The read failed; the previous page is kept.
    Failed,
    /// Nothing to fetch yet, e.g. a search before its first submission.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct ListView<T> {
    request: PageRequest,
    result: PageResult<T>,
    issued: u64,
}

impl<T> ListView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            request: PageRequest::new(page_size),
            result: PageResult::empty(page_size),
            issued: 0,
        }
    }

    pub fn with_range(page_size: usize, range: ScheduleRange) -> Self {
        let mut view = Self::new(page_size);
        view.request.range = Some(range);
        view
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn result(&self) -> &PageResult<T> {
        &self.result
    }

    pub fn page(&self) -> usize {
        self.request.page
    }

    pub fn range(&self) -> Option<ScheduleRange> {
        self.request.range
    }

    pub fn filters(&self) -> Option<&QueryParams> {
        self.request.filters.as_ref()
    }

    /// Sequence number of the latest issued request, `0` before the first.
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Changes the day window. Returns `true` when a refetch is needed.
    pub fn set_range(&mut self, range: Option<ScheduleRange>) -> bool {
        if self.request.range == range {
            return false;
        }
        self.request.range = range;
        self.request.page = 1;
        true
    }

    /// Replaces the active filters. Returns `true` when a refetch is needed.
    pub fn set_filters(&mut self, filters: QueryParams) -> bool {
        if self.request.filters.as_ref() == Some(&filters) {
            return false;
        }
        self.request.filters = Some(filters);
        self.request.page = 1;
        true
    }

    /// Moves to `page`, clamped to the pages of the last result.
    ///
    /// Returns `true` when a refetch is needed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let last = self.result.total_pages().max(1);
        let page = page.clamp(1, last);
        if self.request.page == page {
            return false;
        }
        self.request.page = page;
        true
    }

    /// Back to the first page without touching the other parameters.
    pub fn reset_page(&mut self) {
        self.request.page = 1;
    }

    /// Starts a read for the current parameters.
    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            request: self.request.clone(),
        }
    }

    /// Applies the response to `ticket` unless a newer one was issued since.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        response: ApiResult<PageEnvelope<T>>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued {
            log::debug!(
                "Discarding response {} superseded by request {}",
                ticket.seq,
                self.issued
            );
            return FetchOutcome::Stale;
        }

        match response {
            Ok(envelope) => {
                self.result = PageResult::from_envelope(
                    envelope,
                    ticket.request.page,
                    ticket.request.limit,
                );
                FetchOutcome::Applied
            }
            Err(err) => {
                log::error!("Failed to fetch page {}: {err}", ticket.request.page);
                FetchOutcome::Failed
            }
        }
    }

    /// Issues one read through `fetch` and applies its response.
    pub async fn refresh<F, Fut>(&mut self, fetch: F) -> FetchOutcome
    where
        F: FnOnce(PageRequest) -> Fut,
        Fut: Future<Output = ApiResult<PageEnvelope<T>>>,
    {
        let ticket = self.issue();
        let response = fetch(ticket.request.clone()).await;
        self.resolve(ticket, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;

    fn envelope(results: Vec<u32>, count: usize) -> ApiResult<PageEnvelope<u32>> {
        Ok(PageEnvelope { results, count })
    }

    fn loaded_view() -> ListView<u32> {
        let mut view = ListView::with_range(10, ScheduleRange::Week);
        let ticket = view.issue();
        view.resolve(ticket, envelope((0..10).collect(), 45));
        view.set_page(3);
        view
    }

    #[test]
    fn filter_change_resets_page() {
        let mut view = loaded_view();
        assert_eq!(view.page(), 3);

        assert!(view.set_filters(QueryParams::new().with("name", "yoga")));
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn range_change_resets_page() {
        let mut view = loaded_view();
        assert!(view.set_range(Some(ScheduleRange::Month)));
        assert_eq!(view.page(), 1);
        assert_eq!(view.range(), Some(ScheduleRange::Month));
    }

    #[test]
    fn unchanged_parameters_need_no_refetch() {
        let mut view = loaded_view();
        assert!(!view.set_range(Some(ScheduleRange::Week)));
        assert!(!view.set_page(3));
        assert_eq!(view.page(), 3);

        assert!(view.set_filters(QueryParams::new().with("coach", "Ann")));
        assert!(!view.set_filters(QueryParams::new().with("coach", "Ann")));
    }

    #[test]
    fn page_requests_clamp_to_known_pages() {
        let mut view = loaded_view();
        assert!(view.set_page(99));
        assert_eq!(view.page(), 5);
        assert!(view.set_page(0));
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut view: ListView<u32> = ListView::new(10);
        let first = view.issue();
        let second = view.issue();

        assert_eq!(view.resolve(second, envelope(vec![2], 1)), FetchOutcome::Applied);
        assert_eq!(view.resolve(first, envelope(vec![1], 1)), FetchOutcome::Stale);
        assert_eq!(view.result().items, vec![2]);
    }

    #[test]
    fn failures_keep_previous_page() {
        let mut view = loaded_view();
        let ticket = view.issue();
        let outcome = view.resolve(ticket, Err(ApiError::Server { status: 500 }));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(view.result().total_count, 45);
        assert_eq!(view.result().items.len(), 10);
    }

    #[test]
    fn results_are_replaced_not_merged() {
        let mut view = loaded_view();
        let ticket = view.issue();
        view.resolve(ticket, envelope(vec![7, 8], 2));

        assert_eq!(view.result().items, vec![7, 8]);
        assert!(!view.result().shows_pager());
    }

    #[tokio::test]
    async fn refresh_sends_current_parameters() {
        let mut view: ListView<u32> = ListView::with_range(10, ScheduleRange::TwoWeeks);

        let outcome = view
            .refresh(|request| async move {
                assert_eq!(request.range, Some(ScheduleRange::TwoWeeks));
                assert_eq!(request.page, 1);
                assert_eq!(request.limit, 10);
                envelope(vec![1, 2, 3], 3)
            })
            .await;

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(view.latest_seq(), 1);
        assert_eq!(view.result().items, vec![1, 2, 3]);
    }
}
