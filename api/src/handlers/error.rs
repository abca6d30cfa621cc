//! Mapping from domain errors to HTTP responses
//!
//! Every route funnels its failures through [`handle_domain_error`] so the
//! same domain outcome always produces the same status and body. Internal
//! details are logged server-side and never put into responses.

use actix_web::HttpResponse;
use log::error;
use validator::ValidationErrors;

use sigil_core::errors::{AuthError, DomainError, TokenError, VerificationError};

use crate::dto::ErrorResponse;

/// Maps a domain error to its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth) => handle_auth_error(auth),
        DomainError::Token(token) => handle_token_error(token),
        DomainError::Verification(verification) => handle_verification_error(verification),
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{} not found", resource),
        )),
        DomainError::Internal { message } => {
            error!("Internal error: {}", message);
            internal_error_response()
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "invalid_credentials",
            error.to_string(),
        )),
        AuthError::AccountDisabled => HttpResponse::Forbidden().json(ErrorResponse::new(
            "account_disabled",
            "Confirm your email address before signing in",
        )),
        AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
            "user_already_exists",
            error.to_string(),
        )),
        AuthError::HashingFailed { reason } => {
            error!("Password hashing failed: {}", reason);
            internal_error_response()
        }
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    match error {
        TokenError::Expired => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("token_expired", error.to_string())),
        TokenError::MalformedOrInvalidSignature => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("invalid_token", error.to_string())),
        TokenError::WrongKind { .. } => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("wrong_token_kind", error.to_string())),
        TokenError::RevokedOrUnknown => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("token_revoked", error.to_string())),
        TokenError::GenerationFailed { reason } => {
            error!("Token generation failed: {}", reason);
            internal_error_response()
        }
    }
}

fn handle_verification_error(error: &VerificationError) -> HttpResponse {
    match error {
        VerificationError::NotFound => HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_verification_token",
            error.to_string(),
        )),
    }
}

fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "internal_error",
        "An internal error occurred",
    ))
}

/// Turns request validation failures into a 400 with per-field messages
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let message = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let detail = field_errors
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            if detail.is_empty() {
                format!("{} is invalid", field)
            } else {
                format!("{}: {}", field, detail)
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
}
