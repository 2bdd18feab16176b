//! DTOs used by the payments page.

/// Shown when the account has no payments yet.
pub const NO_PAYMENTS: &str = "There are no past or future payments to display. Payments will be created once you have subscribed.";

/// Data required to render the payments page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentsPageData {
    /// Masked card on file, empty when none is stored.
    pub card_num: String,
    pub upcoming: Vec<String>,
    pub past: Vec<String>,
    pub page: usize,
    pub total_pages: usize,
    /// Empty when the pager is hidden.
    pub pages: Vec<Option<usize>>,
}

impl PaymentsPageData {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty()
    }
}
