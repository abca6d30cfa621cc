//! Request and response payloads

pub mod auth;
pub mod error;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest,
    SessionResponse, VerifyEmailRequest,
};
pub use error::ErrorResponse;
