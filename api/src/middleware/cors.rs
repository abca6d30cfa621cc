//! CORS middleware configuration
//!
//! The refresh token rides a cookie, so browsers only attach it when the
//! CORS layer allows credentials. Development accepts any origin for easy
//! local testing; production only the origins named in `ALLOWED_ORIGINS`
//! plus the frontend that receives the mailed links.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use sigil_shared::config::Environment;

/// Creates the CORS middleware for the current environment.
///
/// # Environment Variables
/// - `ENVIRONMENT`: "production" switches to the restrictive policy
/// - `ALLOWED_ORIGINS`: Comma-separated origin list (production only)
/// - `FRONTEND_BASE_URL`: Always allowed in production
/// - `CORS_MAX_AGE`: Preflight cache lifetime in seconds (default: 3600)
pub fn create_cors() -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .unwrap_or_else(|_| "3600".to_string())
        .parse::<usize>()
        .unwrap_or(3600);

    if Environment::from_env().is_production() {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(max_age)
        .supports_credentials()
}

fn create_production_cors(max_age: usize) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(max_age)
        .supports_credentials();

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(str::trim) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    // The frontend serving the verification and reset pages must always
    // be able to reach the API with credentials
    if let Ok(frontend) = env::var("FRONTEND_BASE_URL") {
        cors = cors.allowed_origin(&frontend);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_development_cors() {
        let _cors = create_development_cors(3600);
    }

    #[test]
    fn test_create_production_cors_reads_origins() {
        env::set_var(
            "ALLOWED_ORIGINS",
            "https://app.example.com, https://admin.example.com",
        );
        let _cors = create_production_cors(600);
        env::remove_var("ALLOWED_ORIGINS");
    }

    #[test]
    fn test_cors_max_age_parsing() {
        env::set_var("CORS_MAX_AGE", "invalid");
        // Garbage max-age falls back to the default instead of panicking
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");
    }
}
