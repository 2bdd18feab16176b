//! Registration, login and the signed-in user's profile.

use crate::api::errors::ApiError;
use crate::api::{AccountReader, AccountWriter};
use crate::domain::account::Profile;
use crate::domain::types::AuthToken;
use crate::forms::accounts::{LoginForm, ProfileForm, RegisterForm};
use crate::models::notice::Notice;
use crate::services::{ServiceError, ServiceResult};

pub const NO_ACCOUNT: &str = "No account exists with given credentials";
pub const REGISTER_FAILED: &str = "Could not register";
pub const PROFILE_EDIT_FAILED: &str = "Could not update profile";

/// Creates an account. A 400 keeps its per-field errors, see
/// [`ServiceError::field_errors`].
pub async fn register<R>(api: &R, form: &RegisterForm) -> ServiceResult<Notice>
where
    R: AccountWriter + ?Sized,
{
    let account = form.to_new_account()?;
    log::info!("Registering {}", account.email);

    api.register(account).await.map_err(|err| {
        if err.client_detail().is_none() {
            log::error!("Registration failed: {err}");
        }
        ServiceError::from(err)
    })?;
    Ok(Notice::success("Registration successful!", "You may now log in").auto_close())
}

/// Exchanges credentials for an access token.
pub async fn login<R>(api: &R, form: &LoginForm) -> ServiceResult<AuthToken>
where
    R: AccountWriter + ?Sized,
{
    let credentials = form.to_credentials()?;
    log::info!("Logging in as {}", credentials.email);

    api.login(credentials).await.map_err(|err| match err {
        ApiError::Rejected { status: 401, .. } => ServiceError::Form(NO_ACCOUNT.to_string()),
        other => {
            log::error!("Login failed: {other}");
            ServiceError::from(other)
        }
    })
}

pub async fn load_profile<R>(api: &R) -> ServiceResult<Profile>
where
    R: AccountReader + ?Sized,
{
    api.get_profile().await.map_err(|err| {
        log::error!("Failed to load profile: {err}");
        ServiceError::from(err)
    })
}

pub async fn update_profile<R>(api: &R, form: &ProfileForm) -> ServiceResult<Notice>
where
    R: AccountWriter + ?Sized,
{
    let update = form.to_update()?;
    api.update_profile(update).await.map_err(|err| {
        if err.client_detail().is_none() {
            log::error!("Failed to update profile: {err}");
        }
        ServiceError::from(err)
    })?;
    Ok(Notice::success("Edit successful!", "Profile info has been updated").auto_close())
}
