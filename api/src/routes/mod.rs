//! Route handlers grouped by resource

pub mod auth;
