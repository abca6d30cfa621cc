//! # Sigil API
//!
//! HTTP layer of the Sigil authentication service, built on Actix-web.
//! Exposes the account lifecycle (register, confirm email, login, refresh,
//! logout) and the password reset flow. All domain decisions live in
//! `sigil_core`; this crate translates HTTP payloads into service calls
//! and domain errors back into status codes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
