//! DTO modules that bridge services with the API and the front-end.

pub mod api;
pub mod payments;
pub mod schedule;
pub mod search;
pub mod studios;
pub mod subscriptions;
