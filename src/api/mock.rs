//! Mock API implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{
    AccountReader, AccountWriter, ClassReader, EnrollmentWriter, NearbyQuery, PageRequest,
    StudioReader,
};
use crate::domain::account::{Credentials, NewAccount, Profile, ProfileUpdate};
use crate::domain::class::{ClassDetails, ClassInstance, EnrollmentUpdate, ScheduledInstance};
use crate::domain::payment::{Payment, PaymentInfo};
use crate::domain::studio::Studio;
use crate::domain::subscription::{Plan, SubscribeReceipt, UnsubscribeReceipt};
use crate::domain::types::{AuthToken, ClassId, ScheduleScope, StudioId};
use crate::dto::api::{PageEnvelope, SubscribeRequest};

mock! {
    pub Api {}

    #[async_trait]
    impl StudioReader for Api {
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
    impl ClassReader for Api {
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
        async fn get_instance(&self, details: String) -> ApiResult<ClassInstance>;
    }

    #[async_trait]
    impl EnrollmentWriter for Api {
        async fn toggle_class_enrollment(
            &self,
            studio_id: StudioId,
            class_id: ClassId,
        ) -> ApiResult<EnrollmentUpdate>;
        async fn toggle_instance_enrollment(&self, details: String) -> ApiResult<EnrollmentUpdate>;
    }

    #[async_trait]
    impl AccountReader for Api {
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
    impl AccountWriter for Api {
        async fn register(&self, account: NewAccount) -> ApiResult<Profile>;
        async fn login(&self, credentials: Credentials) -> ApiResult<AuthToken>;
        async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<Profile>;
        async fn update_payment_info(&self, info: PaymentInfo) -> ApiResult<Profile>;
        async fn subscribe(&self, request: SubscribeRequest) -> ApiResult<SubscribeReceipt>;
        async fn unsubscribe(&self) -> ApiResult<UnsubscribeReceipt>;
    }
}
