//! Typed client for the fitness-studio booking API.
//!
//! The `data` feature compiles the domain model, query building, pagination
//! and the service layer against the API traits. The `client` feature adds
//! the `reqwest` transport and the `tfc` command-line front-end.

#[cfg(feature = "data")]
pub mod api;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod query;
#[cfg(feature = "data")]
pub mod services;
