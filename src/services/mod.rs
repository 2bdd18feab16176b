//! Use cases driving each screen of the booking front-end.
//!
//! Services are generic over the API traits so they can be exercised against
//! mocks. Failures follow one policy: server rejections (4xx) become error
//! notices carrying the server's `detail`, everything else is logged.

pub mod accounts;
pub mod enrollment;
pub mod errors;
pub mod list;
pub mod payments;
pub mod schedule;
pub mod search;
pub mod studios;
pub mod subscriptions;

pub use errors::{ServiceError, ServiceResult};
