//! Strato Client Library
//!
//! Core modules for the Strato provisioning client.

pub mod app;
pub mod authn;
pub mod catalog;
pub mod cost;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod store;
pub mod validate;
pub mod workers;
