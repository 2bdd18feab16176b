//! Studio pages, class details and the nearby-studios map panel.

use crate::api::errors::ApiError;
use crate::api::{ClassReader, NearbyOrigin, NearbyQuery, StudioReader};
use crate::domain::class::ClassDetails;
use crate::domain::studio::{NearbyStudio, Studio, sort_by_distance};
use crate::domain::types::{ClassId, StudioId};
use crate::dto::studios::{NearbyLine, StudioHeader, UNKNOWN_STUDIO};
use crate::models::notice::Notice;
use crate::services::{ServiceError, ServiceResult};

pub const STUDIO_DETAILS_FAILED: &str = "Could not get studio details";
pub const SERVER_ERROR: &str = "Server error";
pub const LOCATION_FAILED: &str = "Could not find location";

/// Loads a studio together with the header shown above its pages.
///
/// Never fails: on error the name falls back to "Unknown" and the failure
/// becomes a notice.
pub async fn load_studio_details<R>(api: &R, studio_id: StudioId) -> (StudioHeader, Option<Studio>)
where
    R: StudioReader + ?Sized,
{
    match api.get_studio(studio_id).await {
        Ok(studio) => {
            let header = StudioHeader {
                name: studio.name.clone(),
                notice: None,
            };
            (header, Some(studio))
        }
        Err(err) => {
            let notice = match &err {
                ApiError::Rejected { detail, .. } => Notice::error(STUDIO_DETAILS_FAILED, detail),
                other => {
                    log::error!("Failed to load studio {studio_id}: {other}");
                    Notice::error(SERVER_ERROR, other.to_string())
                }
            };
            let header = StudioHeader {
                name: UNKNOWN_STUDIO.to_string(),
                notice: Some(notice),
            };
            (header, None)
        }
    }
}

/// Name shown above a studio's class search and schedule pages.
pub async fn load_studio_header<R>(api: &R, studio_id: StudioId) -> StudioHeader
where
    R: StudioReader + ?Sized,
{
    load_studio_details(api, studio_id).await.0
}

pub async fn get_class<R>(api: &R, studio_id: StudioId, class_id: ClassId) -> ServiceResult<ClassDetails>
where
    R: ClassReader + ?Sized,
{
    api.get_class(studio_id, class_id).await.map_err(|err| {
        log::error!("Failed to load class {class_id} of studio {studio_id}: {err}");
        ServiceError::from(err)
    })
}

/// Studios around `origin`, closest first.
///
/// Postal codes are geocoded by the API, which already orders its answer by
/// distance; an unknown code fails with its 404 `detail`.
pub async fn find_nearby_studios<R>(
    api: &R,
    origin: NearbyOrigin,
    limit: usize,
) -> ServiceResult<Vec<NearbyStudio>>
where
    R: StudioReader + ?Sized,
{
    let query = NearbyQuery {
        origin: origin.clone(),
        limit,
    };
    let envelope = api.list_nearby_studios(query).await.map_err(|err| {
        if err.is_not_found() {
            log::info!("No location matches {origin:?}");
        } else {
            log::error!("Failed to load nearby studios: {err}");
        }
        ServiceError::from(err)
    })?;

    Ok(match origin.coordinates() {
        Some(coordinates) => sort_by_distance(envelope.results, &coordinates),
        None => envelope
            .results
            .into_iter()
            .map(NearbyStudio::unmeasured)
            .collect(),
    })
}

pub fn nearby_lines(studios: &[NearbyStudio]) -> Vec<NearbyLine> {
    studios.iter().map(NearbyLine::from).collect()
}
