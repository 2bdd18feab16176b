//! Error type shared by the service layer.

use thiserror::Error;

use crate::api::errors::{ApiError, FieldError};
use crate::models::notice::Notice;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Inline message shown next to the offending form.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Field-level validation errors reported by the API, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ServiceError::Api(err) => err.field_errors(),
            _ => &[],
        }
    }

    /// Converts the error into the notice shown to the user.
    ///
    /// Server rejections and form errors are surfaced under `title`; every
    /// other failure is logged and produces no notice.
    pub fn into_notice(self, title: &str) -> Option<Notice> {
        match self {
            ServiceError::Api(err) => api_notice(&err, title),
            ServiceError::Form(message) => Some(Notice::error(title, message)),
            ServiceError::TypeConstraint(message) => {
                log::error!("{title}: {message}");
                None
            }
        }
    }
}

/// Notice for a 4xx response carrying the server `detail`; other failures are
/// only logged.
pub fn api_notice(err: &ApiError, title: &str) -> Option<Notice> {
    match err.client_detail() {
        Some(detail) => Some(Notice::error(title, detail)),
        None => {
            log::error!("{title}: {err}");
            None
        }
    }
}
