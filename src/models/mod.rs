pub mod config;
pub mod notice;
