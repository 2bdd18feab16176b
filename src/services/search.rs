//! Studio and class search result lists.

use crate::api::{ClassReader, StudioReader};
use crate::domain::class::ClassDetails;
use crate::domain::studio::Studio;
use crate::domain::types::StudioId;
use crate::dto::search::{ClassResultLine, StudioResultLine};
use crate::forms::search::{ClassSearchForm, StudioSearchForm};
use crate::services::ServiceResult;
use crate::services::list::{FetchOutcome, ListView};

#[derive(Debug, Clone)]
pub struct StudioSearch {
    view: ListView<Studio>,
}

impl StudioSearch {
    pub fn new(page_size: usize) -> Self {
        Self {
            view: ListView::new(page_size),
        }
    }

    pub fn view(&self) -> &ListView<Studio> {
        &self.view
    }

    /// Applies a submitted form. Returns `true` when the list must be refetched.
    pub fn submit(&mut self, form: &StudioSearchForm) -> ServiceResult<bool> {
        let query = form.to_query()?;
        Ok(self.view.set_filters(query))
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.view.set_page(page)
    }

    pub async fn refresh<R: StudioReader + ?Sized>(&mut self, api: &R) -> FetchOutcome {
        if self.view.filters().is_none() {
            return FetchOutcome::Skipped;
        }
        self.view
            .refresh(|request| api.search_studios(request))
            .await
    }

    pub fn lines(&self) -> Vec<StudioResultLine> {
        self.view
            .result()
            .items
            .iter()
            .map(StudioResultLine::from)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ClassSearch {
    studio_id: StudioId,
    view: ListView<ClassDetails>,
}

impl ClassSearch {
    pub fn new(studio_id: StudioId, page_size: usize) -> Self {
        Self {
            studio_id,
            view: ListView::new(page_size),
        }
    }

    pub fn view(&self) -> &ListView<ClassDetails> {
        &self.view
    }

    pub fn submit(&mut self, form: &ClassSearchForm) -> ServiceResult<bool> {
        let query = form.to_query()?;
        Ok(self.view.set_filters(query))
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.view.set_page(page)
    }

    pub async fn refresh<R: ClassReader + ?Sized>(&mut self, api: &R) -> FetchOutcome {
        if self.view.filters().is_none() {
            return FetchOutcome::Skipped;
        }
        let studio_id = self.studio_id;
        self.view
            .refresh(|request| api.search_classes(studio_id, request))
            .await
    }

    pub fn lines(&self) -> Vec<ClassResultLine> {
        self.view
            .result()
            .items
            .iter()
            .map(|class| ClassResultLine::new(class, self.studio_id))
            .collect()
    }
}
