//! Configuration store

pub mod config_store;
