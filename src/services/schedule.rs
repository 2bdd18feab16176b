//! Schedule lists of a studio, of a class and of the signed-in user.

use crate::api::errors::ApiResult;
use crate::api::{AccountReader, ClassReader, PageRequest, StudioReader};
use crate::domain::class::ScheduledInstance;
use crate::domain::types::{ClassId, ScheduleRange, ScheduleScope, StudioId};
use crate::dto::api::PageEnvelope;
use crate::dto::schedule::{ScheduleLine, SchedulePageData};
use crate::services::list::{FetchOutcome, ListView};

/// Which endpoint a schedule list reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Studio(StudioId),
    Class(StudioId, ClassId),
    User(ScheduleScope),
}

#[derive(Debug, Clone)]
pub struct ScheduleList {
    source: ScheduleSource,
    /// Window restored when switching back from the ongoing scope.
    range: ScheduleRange,
    view: ListView<ScheduledInstance>,
}

impl ScheduleList {
    pub fn new(source: ScheduleSource, page_size: usize) -> Self {
        let range = ScheduleRange::default();
        let mut view = ListView::with_range(page_size, range);
        if matches!(source, ScheduleSource::User(scope) if !scope.uses_range()) {
            view.set_range(None);
        }
        Self {
            source,
            range,
            view,
        }
    }

    pub fn source(&self) -> ScheduleSource {
        self.source
    }

    pub fn view(&self) -> &ListView<ScheduledInstance> {
        &self.view
    }

    /// Returns `true` when the list must be refetched.
    pub fn set_range(&mut self, range: ScheduleRange) -> bool {
        self.range = range;
        if matches!(self.source, ScheduleSource::User(scope) if !scope.uses_range()) {
            return false;
        }
        self.view.set_range(Some(range))
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.view.set_page(page)
    }

    /// Switches the user's schedule between upcoming, history and ongoing.
    ///
    /// Has no effect on studio and class schedules.
    pub fn set_scope(&mut self, scope: ScheduleScope) -> bool {
        let ScheduleSource::User(current) = self.source else {
            return false;
        };
        if current == scope {
            return false;
        }
        self.source = ScheduleSource::User(scope);
        let range = scope.uses_range().then_some(self.range);
        self.view.set_range(range);
        self.view.reset_page();
        true
    }

    pub async fn refresh<R>(&mut self, api: &R) -> FetchOutcome
    where
        R: StudioReader + ClassReader + AccountReader + ?Sized,
    {
        let source = self.source;
        self.view
            .refresh(|request| fetch_schedule(api, source, request))
            .await
    }

    pub fn page_data(&self) -> SchedulePageData {
        let line = match self.source {
            ScheduleSource::Class(..) => ScheduleLine::for_class,
            _ => ScheduleLine::for_listing,
        };
        SchedulePageData::new(self.view.result(), self.view.range(), line)
    }
}

async fn fetch_schedule<R>(
    api: &R,
    source: ScheduleSource,
    request: PageRequest,
) -> ApiResult<PageEnvelope<ScheduledInstance>>
where
    R: StudioReader + ClassReader + AccountReader + ?Sized,
{
    match source {
        ScheduleSource::Studio(studio_id) => api.list_studio_schedule(studio_id, request).await,
        ScheduleSource::Class(studio_id, class_id) => {
            api.list_class_schedule(studio_id, class_id, request).await
        }
        ScheduleSource::User(scope) => api.list_user_schedule(scope, request).await,
    }
}
