//! DTOs for studio pages and the map side panel.

use serde::Serialize;

use crate::domain::studio::NearbyStudio;
use crate::models::notice::Notice;

/// Name shown above per-studio pages.
pub const UNKNOWN_STUDIO: &str = "Unknown";

/// Studio title plus the notice raised while loading it, if any.
#[derive(Debug, Clone)]
pub struct StudioHeader {
    pub name: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbyLine {
    pub name: String,
    pub link: String,
    pub address: String,
    pub postal_code: String,
    /// `6.5 km`; absent when the origin was a postal code.
    pub distance: Option<String>,
    pub directions: Option<String>,
}

impl From<&NearbyStudio> for NearbyLine {
    fn from(nearby: &NearbyStudio) -> Self {
        Self {
            name: nearby.studio.name.clone(),
            link: nearby.studio.link(),
            address: nearby.studio.address.clone(),
            postal_code: nearby.studio.postal_code.clone(),
            distance: nearby.distance_label(),
            directions: nearby.studio.directions.clone(),
        }
    }
}
