//! Form definitions backing the search, subscription and account screens.

use thiserror::Error;

pub mod accounts;
pub mod search;
pub mod subscriptions;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("Please select at least one filter field")]
    NoFilters,

    #[error("Please select a plan")]
    NoPlanSelected,

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,
}
