//! HTTP API client

pub mod client;
pub mod deployments;
pub mod images;
