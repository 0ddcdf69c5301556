//! Request shaping for deployment submission

pub mod request;
