//! Password reset request endpoint

use actix_web::{web, HttpResponse};
use log::{error, info};
use validator::Validate;

use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::{PasswordHasher, VerificationPurpose};

use crate::dto::{ForgotPasswordRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::routes::auth::AppState;

/// POST /api/v1/auth/forgot-password
///
/// Issues a reset token and mails it, answering with the same 200 whether
/// the address exists or not. A mail transport failure is also hidden
/// behind the neutral answer, because a 500 here would only ever happen
/// for addresses that exist.
pub async fn forgot_password<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = request.email.trim().to_lowercase();

    let user = match state.users.find_by_email(&email).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            info!("Password reset requested for unknown email");
            None
        }
        Err(e) => return handle_domain_error(&e),
    };

    if let Some(user) = user {
        let token = match state
            .verification
            .issue(&user, VerificationPurpose::PasswordReset)
            .await
        {
            Ok(token) => token,
            Err(e) => return handle_domain_error(&e),
        };

        if let Err(reason) = state
            .mailer
            .send_password_reset_email(&user.email, &token)
            .await
        {
            // The token stays in the slot; a repeat request issues a new one
            error!("Password reset mail failed: {}", reason);
        }
    }

    HttpResponse::Ok().json(MessageResponse::new(
        "If that address is registered, a reset link is on its way.",
    ))
}
