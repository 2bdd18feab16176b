//! DTOs used by the studio and class search result lists.

use serde::Serialize;

use crate::domain::class::ClassDetails;
use crate::domain::studio::Studio;
use crate::domain::types::StudioId;

/// Shown instead of the list when nothing matched.
pub const NO_RESULTS: &str = "No results found";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StudioResultLine {
    pub name: String,
    pub link: String,
    pub address: String,
    pub amenities: String,
    pub classes: String,
}

impl From<&Studio> for StudioResultLine {
    fn from(studio: &Studio) -> Self {
        Self {
            name: studio.name.clone(),
            link: studio.link(),
            address: studio.address.clone(),
            amenities: studio.amenities_summary(),
            classes: studio.classes_summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassResultLine {
    pub name: String,
    pub link: String,
    pub coach: String,
    pub scheduled: String,
}

impl ClassResultLine {
    pub fn new(class: &ClassDetails, studio_id: StudioId) -> Self {
        Self {
            name: class.name.clone(),
            link: class.link(studio_id),
            coach: class.coach.clone(),
            scheduled: class.time_span(),
        }
    }
}
