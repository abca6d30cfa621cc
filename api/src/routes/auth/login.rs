//! Login endpoint

use actix_web::{web, HttpResponse};
use log::{info, warn};
use validator::Validate;

use sigil_core::errors::AuthError;
use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::PasswordHasher;

use crate::dto::{LoginRequest, SessionResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::routes::auth::cookies::refresh_cookie;
use crate::routes::auth::AppState;

/// POST /api/v1/auth/login
///
/// Verifies credentials and starts a session. The access token comes back
/// in the body; the refresh token only travels in the cookie. An unknown
/// email and a wrong password produce the same 401.
pub async fn login<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    request: web::Json<LoginRequest>,
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
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Login attempt for unknown email");
            return handle_domain_error(&AuthError::InvalidCredentials.into());
        }
        Err(e) => return handle_domain_error(&e),
    };

    match state.hasher.verify(&request.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Login attempt with wrong password");
            return handle_domain_error(&AuthError::InvalidCredentials.into());
        }
        Err(e) => return handle_domain_error(&e),
    }

    let pair = match state.sessions.login(&user).await {
        Ok(pair) => pair,
        Err(e) => return handle_domain_error(&e),
    };

    info!("Login succeeded");
    let cookie = refresh_cookie(
        &state.session_config,
        &pair.refresh_token,
        pair.refresh_expires_in,
    );
    HttpResponse::Ok()
        .cookie(cookie)
        .json(SessionResponse::new(pair.access_token, pair.access_expires_in))
}
