//! Password reset completion endpoint

use actix_web::{web, HttpResponse};
use log::info;
use validator::Validate;

use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::PasswordHasher;

use crate::dto::{MessageResponse, ResetPasswordRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::routes::auth::AppState;

/// POST /api/v1/auth/reset-password
///
/// Consumes the mailed reset token and installs the new password. Every
/// outstanding session dies with it; the owner signs in again, anyone
/// holding a stolen refresh token does not.
pub async fn reset_password<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .verification
        .consume_for_password_reset(&request.token, &request.new_password)
        .await
    {
        Ok(_) => {
            info!("Password reset completed");
            HttpResponse::Ok().json(MessageResponse::new(
                "Password updated. Sign in with your new password.",
            ))
        }
        Err(e) => handle_domain_error(&e),
    }
}
