use async_trait::async_trait;

use crate::api::errors::ApiResult;
use crate::domain::account::{Credentials, NewAccount, Profile, ProfileUpdate};
use crate::domain::class::{ClassDetails, ClassInstance, EnrollmentUpdate, ScheduledInstance};
use crate::domain::payment::{Payment, PaymentInfo};
use crate::domain::studio::{Coordinates, Studio};
use crate::domain::subscription::{Plan, SubscribeReceipt, UnsubscribeReceipt};
use crate::domain::types::{AuthToken, ClassId, ScheduleRange, ScheduleScope, StudioId};
use crate::dto::api::{PageEnvelope, SubscribeRequest};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::query::QueryParams;

pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Parameters of one paginated read: `{range, page, limit}` or `{filters, page, limit}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
    pub range: Option<ScheduleRange>,
    pub filters: Option<QueryParams>,
}

impl PageRequest {
    pub fn new(limit: usize) -> Self {
        Self {
            page: 1,
            limit,
            range: None,
            filters: None,
        }
    }

    pub fn range(mut self, range: ScheduleRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn filters(mut self, filters: QueryParams) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn paginate(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Filters first, then `range`, `page` and `limit`.
    pub fn to_query(&self) -> QueryParams {
        let mut query = self.filters.clone().unwrap_or_default();
        if let Some(range) = self.range {
            query.push("range", range.to_string());
        }
        query.push("page", self.page.to_string());
        query.push("limit", self.limit.to_string());
        query
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Where a nearby-studios search is centred.
#[derive(Debug, Clone, PartialEq)]
pub enum NearbyOrigin {
    Coordinates(Coordinates),
    /// Geocoded by the API; unknown codes are answered with a 404.
    PostalCode(String),
}

impl NearbyOrigin {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            NearbyOrigin::Coordinates(origin) => Some(*origin),
            NearbyOrigin::PostalCode(_) => None,
        }
    }
}

/// Location-based studio lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub origin: NearbyOrigin,
    pub limit: usize,
}

impl NearbyQuery {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        match &self.origin {
            NearbyOrigin::Coordinates(origin) => {
                query.push("lat", origin.lat_param());
                query.push("long", origin.long_param());
            }
            NearbyOrigin::PostalCode(code) => {
                query.push("postal_code", code.trim());
            }
        }
        query.push("limit", self.limit.to_string());
        query
    }
}

#[async_trait]
pub trait StudioReader: Send + Sync {
    async fn get_studio(&self, studio_id: StudioId) -> ApiResult<Studio>;
    async fn list_nearby_studios(&self, query: NearbyQuery) -> ApiResult<PageEnvelope<Studio>>;
    async fn search_studios(&self, request: PageRequest) -> ApiResult<PageEnvelope<Studio>>;
    async fn list_studio_schedule(
        &self,
        studio_id: StudioId,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>>;
}

#[async_trait]
pub trait ClassReader: Send + Sync {
    async fn get_class(&self, studio_id: StudioId, class_id: ClassId) -> ApiResult<ClassDetails>;
    async fn list_class_schedule(
        &self,
        studio_id: StudioId,
        class_id: ClassId,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>>;
    async fn search_classes(
        &self,
        studio_id: StudioId,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ClassDetails>>;
    /// Fetches an instance through the `details` path of a schedule entry.
    async fn get_instance(&self, details: String) -> ApiResult<ClassInstance>;
}

/// Enrollment toggles; the server decides the direction.
#[async_trait]
pub trait EnrollmentWriter: Send + Sync {
    async fn toggle_class_enrollment(
        &self,
        studio_id: StudioId,
        class_id: ClassId,
    ) -> ApiResult<EnrollmentUpdate>;
    async fn toggle_instance_enrollment(&self, details: String) -> ApiResult<EnrollmentUpdate>;
}

#[async_trait]
pub trait AccountReader: Send + Sync {
    async fn get_profile(&self) -> ApiResult<Profile>;
    async fn list_user_schedule(
        &self,
        scope: ScheduleScope,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>>;
    async fn list_payments(&self, request: PageRequest) -> ApiResult<PageEnvelope<Payment>>;
    async fn list_plans(&self) -> ApiResult<Vec<Plan>>;
}

#[async_trait]
pub trait AccountWriter: Send + Sync {
    async fn register(&self, account: NewAccount) -> ApiResult<Profile>;
    async fn login(&self, credentials: Credentials) -> ApiResult<AuthToken>;
    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<Profile>;
    async fn update_payment_info(&self, info: PaymentInfo) -> ApiResult<Profile>;
    async fn subscribe(&self, request: SubscribeRequest) -> ApiResult<SubscribeReceipt>;
    async fn unsubscribe(&self) -> ApiResult<UnsubscribeReceipt>;
}
