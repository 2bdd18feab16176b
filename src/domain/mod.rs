pub mod account;
pub mod class;
pub mod payment;
pub mod studio;
pub mod subscription;
pub mod types;
