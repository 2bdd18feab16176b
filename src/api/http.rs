//! `reqwest`-backed implementation of the API traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::errors::{ApiError, ApiResult};
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
use crate::dto::api::{ErrorBody, LoginResponse, PageEnvelope, PaymentInfoUpdate, SubscribeRequest};
use crate::models::config::ClientConfig;

/// HTTP client bound to one API base URL and, optionally, one session token.
///
/// The token lives on the handle and is attached to each request as it is
/// built; there is no process-wide default header.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<AuthToken>,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Handle that authenticates every request with `token`.
    pub fn with_token(&self, token: AuthToken) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{method} {url}");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    fn authenticated(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        if self.token.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(self.request(method, path))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(ApiError::from);
        }

        if status.is_client_error() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(body.into_error(status.as_u16()));
        }

        Err(ApiError::Server {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl StudioReader for HttpApi {
    async fn get_studio(&self, studio_id: StudioId) -> ApiResult<Studio> {
        let path = format!("/studios/{studio_id}/details/");
        Self::send(self.request(Method::GET, &path)).await
    }

    async fn list_nearby_studios(&self, query: NearbyQuery) -> ApiResult<PageEnvelope<Studio>> {
        let path = query.to_query().apply_to("/studios/nearby");
        Self::send(self.request(Method::GET, &path)).await
    }

    async fn search_studios(&self, request: PageRequest) -> ApiResult<PageEnvelope<Studio>> {
        let path = request.to_query().apply_to("/studios/search");
        Self::send(self.request(Method::GET, &path)).await
    }

    async fn list_studio_schedule(
        &self,
        studio_id: StudioId,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>> {
        let path = request
            .to_query()
            .apply_to(&format!("/studios/{studio_id}/schedule"));
        Self::send(self.request(Method::GET, &path)).await
    }
}

#[async_trait]
impl ClassReader for HttpApi {
    async fn get_class(&self, studio_id: StudioId, class_id: ClassId) -> ApiResult<ClassDetails> {
        let path = format!("/studios/{studio_id}/classes/{class_id}/");
        Self::send(self.request(Method::GET, &path)).await
    }

    async fn list_class_schedule(
        &self,
        studio_id: StudioId,
        class_id: ClassId,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>> {
        let path = request
            .to_query()
            .apply_to(&format!("/studios/{studio_id}/classes/{class_id}/list"));
        Self::send(self.request(Method::GET, &path)).await
    }

    async fn search_classes(
        &self,
        studio_id: StudioId,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ClassDetails>> {
        let path = request
            .to_query()
            .apply_to(&format!("/studios/{studio_id}/classes/search"));
        Self::send(self.request(Method::GET, &path)).await
    }

    async fn get_instance(&self, details: String) -> ApiResult<ClassInstance> {
        Self::send(self.request(Method::GET, &details)).await
    }
}

#[async_trait]
impl EnrollmentWriter for HttpApi {
    async fn toggle_class_enrollment(
        &self,
        studio_id: StudioId,
        class_id: ClassId,
    ) -> ApiResult<EnrollmentUpdate> {
        let path = format!("/studios/{studio_id}/classes/{class_id}/");
        Self::send(self.authenticated(Method::PATCH, &path)?).await
    }

    async fn toggle_instance_enrollment(&self, details: String) -> ApiResult<EnrollmentUpdate> {
        Self::send(self.authenticated(Method::PATCH, &details)?).await
    }
}

#[async_trait]
impl AccountReader for HttpApi {
    async fn get_profile(&self) -> ApiResult<Profile> {
        Self::send(self.authenticated(Method::GET, "/accounts/profile/")?).await
    }

    async fn list_user_schedule(
        &self,
        scope: ScheduleScope,
        request: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>> {
        let path = request
            .to_query()
            .apply_to(&format!("/accounts/{}/", scope.as_str()));
        Self::send(self.authenticated(Method::GET, &path)?).await
    }

    async fn list_payments(&self, request: PageRequest) -> ApiResult<PageEnvelope<Payment>> {
        let path = request.to_query().apply_to("/accounts/payments/");
        Self::send(self.authenticated(Method::GET, &path)?).await
    }

    async fn list_plans(&self) -> ApiResult<Vec<Plan>> {
        Self::send(self.authenticated(Method::GET, "/accounts/subscribe/")?).await
    }
}

#[async_trait]
impl AccountWriter for HttpApi {
    async fn register(&self, account: NewAccount) -> ApiResult<Profile> {
        let builder = self
            .request(Method::POST, "/accounts/register/")
            .json(&account);
        Self::send(builder).await
    }

    async fn login(&self, credentials: Credentials) -> ApiResult<AuthToken> {
        let builder = self
            .request(Method::POST, "/accounts/login/")
            .json(&credentials);
        let response: LoginResponse = Self::send(builder).await?;
        AuthToken::new(response.access).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<Profile> {
        let builder = self
            .authenticated(Method::PATCH, "/accounts/profile/")?
            .json(&update);
        Self::send(builder).await
    }

    async fn update_payment_info(&self, info: PaymentInfo) -> ApiResult<Profile> {
        let builder = self
            .authenticated(Method::PATCH, "/accounts/profile/")?
            .json(&PaymentInfoUpdate { payment_info: info });
        Self::send(builder).await
    }

    async fn subscribe(&self, request: SubscribeRequest) -> ApiResult<SubscribeReceipt> {
        let builder = self
            .authenticated(Method::PUT, "/accounts/subscribe/")?
            .json(&request);
        Self::send(builder).await
    }

    async fn unsubscribe(&self) -> ApiResult<UnsubscribeReceipt> {
        Self::send(self.authenticated(Method::DELETE, "/accounts/subscribe/")?).await
    }
}
