use thiserror::Error;

/// Validation message the API attached to one request field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Drops the trailing periods the API puts on validation messages.
    pub fn new(field: impl Into<String>, message: &str) -> Self {
        Self {
            field: field.into(),
            message: message.replace('.', ""),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 4xx response carrying the server's explanation.
    #[error("Request rejected ({status}): {detail}")]
    Rejected {
        status: u16,
        detail: String,
        /// Per-field validation errors, empty unless the body carried some.
        fields: Vec<FieldError>,
    },

    #[error("Server error ({status})")]
    Server { status: u16 },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Used when a 4xx body carries no `detail` field.
pub const DEFAULT_REJECTION: &str = "The request could not be completed.";

impl ApiError {
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        ApiError::Rejected {
            status,
            detail: detail.unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            fields: Vec::new(),
        }
    }

    /// 4xx rejection of individual fields; `detail` lists them as `field: message`.
    pub fn invalid_fields(status: u16, fields: Vec<FieldError>) -> Self {
        let detail = fields
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect::<Vec<_>>()
            .join("; ");
        ApiError::Rejected {
            status,
            detail,
            fields,
        }
    }

    /// Server-supplied message of a 4xx response.
    pub fn client_detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Rejected { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Server { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
