//! Email confirmation endpoint

use actix_web::{web, HttpResponse};
use log::info;
use validator::Validate;

use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::PasswordHasher;

use crate::dto::{MessageResponse, VerifyEmailRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::routes::auth::AppState;

/// POST /api/v1/auth/verify-email
///
/// Consumes the mailed confirmation token and enables the account. The
/// token works exactly once; an unknown and an already-used token are
/// indistinguishable in the response.
pub async fn verify_email<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    request: web::Json<VerifyEmailRequest>,
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
        .consume_for_email_verification(&request.token)
        .await
    {
        Ok(_) => {
            info!("Email confirmed, account enabled");
            HttpResponse::Ok().json(MessageResponse::new(
                "Email confirmed. You can now sign in.",
            ))
        }
        Err(e) => handle_domain_error(&e),
    }
}
