//! Refresh token cookie construction
//!
//! The refresh token never appears in a response body. It rides an
//! HttpOnly cookie scoped to the whole API, so page scripts cannot read
//! it and the browser sends it back on refresh calls by itself.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieBuilder, SameSite};

use sigil_shared::config::SessionConfig;

/// Builds the refresh cookie carrying `token`, valid for `max_age_secs`
pub(crate) fn refresh_cookie(
    config: &SessionConfig,
    token: &str,
    max_age_secs: i64,
) -> Cookie<'static> {
    base_cookie(config, token.to_string())
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Builds an empty, immediately expiring cookie that clears the token
pub(crate) fn clear_refresh_cookie(config: &SessionConfig) -> Cookie<'static> {
    base_cookie(config, String::new())
        .max_age(Duration::ZERO)
        .finish()
}

fn base_cookie(config: &SessionConfig, value: String) -> CookieBuilder<'static> {
    Cookie::build(config.cookie_name.clone(), value)
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}
