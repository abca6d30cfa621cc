//! Session lifecycle module
//!
//! Ties the token codec, the refresh token store, and the user directory
//! together into login, refresh, authenticate, and logout operations.

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionIssuer;
