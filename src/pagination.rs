use serde::Serialize;

use crate::dto::api::PageEnvelope;

/// Page length used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total_count` items.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of remote records plus the counters needed to page through them.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_size: usize,
    /// 1-based.
    pub page_index: usize,
}

impl<T> PageResult<T> {
    /// Empty result shown before the first fetch completes.
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_size,
            page_index: 1,
        }
    }

    /// Builds a result from the API envelope, keeping at most `page_size` items.
    pub fn from_envelope(envelope: PageEnvelope<T>, page_index: usize, page_size: usize) -> Self {
        let mut items = envelope.results;
        items.truncate(page_size);
        Self {
            items,
            total_count: envelope.count,
            page_size,
            page_index: page_index.max(1),
        }
    }

    /// Derived from the count, never taken from the server.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    /// The pager is only rendered when one page cannot hold everything.
    pub fn shows_pager(&self) -> bool {
        self.total_count > self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Page links around the current page; `None` marks an elided gap.
    pub fn pages(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages(), self.page_index, 2, 2, 4, 2)
    }
}
