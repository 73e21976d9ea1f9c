pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod display;
pub mod payment;
pub mod request;
pub mod services;
