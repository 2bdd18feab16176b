//! DTOs shaped for the schedule lists.

use serde::Serialize;

use crate::domain::class::ScheduledInstance;
use crate::domain::types::ScheduleRange;
use crate::pagination::PageResult;

/// One rendered schedule entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleLine {
    pub text: String,
    /// Deep link to the class page, absent when already on it.
    pub link: Option<String>,
    /// API path used by the enrollment popover.
    pub details: String,
}

impl ScheduleLine {
    /// Entry on a class page: `From 09:00 to 10:00 on 2024-06-01`.
    pub fn for_class(instance: &ScheduledInstance) -> Self {
        Self {
            text: format!("From {}", instance.time_span()),
            link: None,
            details: instance.details.clone(),
        }
    }

    /// Entry on a studio or user schedule: `Yoga (09:00 to 10:00 on 2024-06-01)`.
    pub fn for_listing(instance: &ScheduledInstance) -> Self {
        Self {
            text: format!("{} ({})", instance.class_name, instance.time_span()),
            link: Some(instance.class_link()),
            details: instance.details.clone(),
        }
    }
}

/// Data required to render a schedule list with its pager.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulePageData {
    pub lines: Vec<ScheduleLine>,
    pub range: Option<ScheduleRange>,
    pub page: usize,
    pub total_pages: usize,
    /// Empty when the pager is hidden.
    pub pages: Vec<Option<usize>>,
}

impl SchedulePageData {
    pub fn new(
        result: &PageResult<ScheduledInstance>,
        range: Option<ScheduleRange>,
        line: fn(&ScheduledInstance) -> ScheduleLine,
    ) -> Self {
        Self {
            lines: result.items.iter().map(line).collect(),
            range,
            page: result.page_index,
            total_pages: result.total_pages(),
            pages: if result.shows_pager() {
                result.pages()
            } else {
                Vec::new()
            },
        }
    }
}
