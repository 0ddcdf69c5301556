//! Persisted local state

pub mod layout;
pub mod session;
pub mod settings;
pub mod templates;
