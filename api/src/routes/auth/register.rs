//! Registration endpoint

use actix_web::{web, HttpResponse};
use log::{error, info};
use validator::Validate;

use sigil_core::domain::entities::user::User;
use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::{PasswordHasher, VerificationPurpose};

use crate::dto::{ErrorResponse, MessageResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::routes::auth::AppState;

/// POST /api/v1/auth/register
///
/// Creates a disabled account and mails a confirmation token. If the mail
/// cannot go out, the account is rolled back so retrying with the same
/// address is not rejected as a duplicate.
pub async fn register<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    request: web::Json<RegisterRequest>,
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

    let password_hash = match state.hasher.hash(&request.password) {
        Ok(hash) => hash,
        Err(e) => return handle_domain_error(&e),
    };

    // Duplicate emails are rejected by the repository itself
    let user = match state.users.create(User::new(email, password_hash)).await {
        Ok(user) => user,
        Err(e) => return handle_domain_error(&e),
    };

    let token = match state
        .verification
        .issue(&user, VerificationPurpose::EmailConfirmation)
        .await
    {
        Ok(token) => token,
        Err(e) => return handle_domain_error(&e),
    };

    if let Err(reason) = state
        .mailer
        .send_confirmation_email(&user.email, &token)
        .await
    {
        error!(
            "Confirmation mail failed, rolling back registration: {}",
            reason
        );
        if let Err(e) = state.users.delete(user.id).await {
            error!("Rollback of user {} failed: {}", user.id, e);
        }
        return HttpResponse::InternalServerError().json(ErrorResponse::new(
            "mail_delivery_failed",
            "Could not send the confirmation mail, please try again",
        ));
    }

    info!("Registered new account pending email confirmation");
    HttpResponse::Created().json(MessageResponse::new(
        "Registration successful. Check your mailbox for the confirmation link.",
    ))
}
