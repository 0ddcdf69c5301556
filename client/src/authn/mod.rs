//! Authentication token storage

pub mod token_cache;
