//! Wire envelopes exchanged with the booking REST API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::{ApiError, FieldError};
use crate::domain::payment::PaymentInfo;
use crate::domain::subscription::Plan;

/// Paginated list envelope: `{ results: [...], count: N }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageEnvelope<T> {
    pub results: Vec<T>,
    /// Total number of matching records on the server.
    pub count: usize,
}

impl<T> PageEnvelope<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            count: 0,
        }
    }
}

/// Error body returned with 4xx responses: `{detail}` or `{field: [messages]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ErrorBody {
    /// First message reported for each field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|(field, value)| {
                let message = match value {
                    Value::String(message) => message.as_str(),
                    Value::Array(messages) => messages.first()?.as_str()?,
                    _ => return None,
                };
                Some(FieldError::new(field, message))
            })
            .collect()
    }

    pub fn into_error(self, status: u16) -> ApiError {
        let fields = self.field_errors();
        match self.detail {
            Some(detail) => ApiError::rejected(status, Some(detail)),
            None if !fields.is_empty() => ApiError::invalid_fields(status, fields),
            None => ApiError::rejected(status, None),
        }
    }
}

/// Token pair issued by `/accounts/login/`.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Body of `PUT /accounts/subscribe/`.
#[derive(Clone, Debug, Serialize)]
pub struct SubscribeRequest {
    pub subscription: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_info: Option<PaymentInfo>,
}

/// Body of `PATCH /accounts/profile/` when replacing the card on file.
#[derive(Clone, Debug, Serialize)]
pub struct PaymentInfoUpdate {
    pub payment_info: PaymentInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::BillingCycle;

    #[test]
    fn resubscribe_body_omits_payment_info() {
        let request = SubscribeRequest {
            subscription: Plan {
                id: Some(2),
                billing_cycle: BillingCycle::Yearly,
                charge: 150.0,
                currently_subscribed: true,
                cancelled_payment: true,
            },
            payment_info: None,
        };
        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "subscription": {"id": 2, "billing_cycle": "YEARLY", "charge": 150.0}
            })
        );
    }

    #[test]
    fn error_body_collects_field_errors() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"email": ["account with this email already exists."], "old_password": "Password is incorrect."}"#,
        )
        .expect("valid");
        assert_eq!(body.detail, None);

        let err = body.into_error(400);
        assert_eq!(
            err.field_errors(),
            &[
                FieldError::new("email", "account with this email already exists"),
                FieldError::new("old_password", "Password is incorrect"),
            ]
        );
    }

    #[test]
    fn error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "No matching location found."}"#).expect("valid");
        let err = body.into_error(404);
        assert_eq!(err.client_detail(), Some("No matching location found."));
        assert!(err.is_not_found());
        assert!(err.field_errors().is_empty());
    }
}
