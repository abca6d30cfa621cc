//! Session refresh endpoint

use actix_web::{web, HttpRequest, HttpResponse};

use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::PasswordHasher;

use crate::dto::{ErrorResponse, SessionResponse};
use crate::handlers::error::handle_domain_error;
use crate::routes::auth::cookies::refresh_cookie;
use crate::routes::auth::AppState;

/// POST /api/v1/auth/refresh
///
/// Exchanges the refresh cookie for a fresh pair and rotates the old
/// token out atomically. Two concurrent calls with the same cookie leave
/// exactly one caller with a live session; the loser gets a 401 like any
/// other revoked token.
pub async fn refresh<U, R, H>(
    state: web::Data<AppState<U, R, H>>,
    request: HttpRequest,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let cookie = match request.cookie(&state.session_config.cookie_name) {
        Some(cookie) => cookie,
        None => {
            return HttpResponse::Unauthorized().json(ErrorResponse::new(
                "missing_refresh_token",
                "No refresh token cookie was sent",
            ))
        }
    };

    match state.sessions.refresh(cookie.value()).await {
        Ok((_user, pair)) => {
            let cookie = refresh_cookie(
                &state.session_config,
                &pair.refresh_token,
                pair.refresh_expires_in,
            );
            HttpResponse::Ok()
                .cookie(cookie)
                .json(SessionResponse::new(pair.access_token, pair.access_expires_in))
        }
        Err(e) => handle_domain_error(&e),
    }
}
