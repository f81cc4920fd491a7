pub mod billing;
pub mod config;
pub mod dashboard;
pub mod http;
