//! Logout endpoint

use actix_web::{web, HttpResponse};
use log::info;

use sigil_core::errors::TokenError;
use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::PasswordHasher;

use crate::dto::MessageResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::auth::cookies::clear_refresh_cookie;
use crate::routes::auth::AppState;

/// POST /api/v1/auth/logout
///
/// Revokes every refresh token the caller holds and clears the session
/// cookie. Requires a valid access token; the route sits behind
/// [`crate::middleware::JwtAuth`]. Calling it twice is harmless, the
/// second call simply finds nothing left to revoke.
pub async fn logout<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let user = match state.users.find_by_email(&auth.subject).await {
        Ok(Some(user)) => user,
        Ok(None) => return handle_domain_error(&TokenError::RevokedOrUnknown.into()),
        Err(e) => return handle_domain_error(&e),
    };

    match state.sessions.logout(&user).await {
        Ok(revoked) => {
            info!("Session ended, revoked {} refresh records", revoked);
            HttpResponse::Ok()
                .cookie(clear_refresh_cookie(&state.session_config))
                .json(MessageResponse::new("Logged out."))
        }
        Err(e) => handle_domain_error(&e),
    }
}
