//! Application factory
//!
//! Builds the Actix application from a pre-wired [`AppState`], so the
//! binary and the integration tests assemble exactly the same route
//! table and middleware stack.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, Error, HttpResponse};

use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::PasswordHasher;

use crate::middleware::{create_cors, JwtAuth};
use crate::routes::auth::{
    forgot_password::forgot_password, login::login, logout::logout, refresh::refresh,
    register::register, reset_password::reset_password, verify_email::verify_email, AppState,
};

/// Create and configure the application with all routes and middleware.
pub fn create_app<U, R, H>(
    app_state: web::Data<AppState<U, R, H>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let cors = create_cors();
    let auth_guard = JwtAuth::new(app_state.codec.clone());

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, R, H>))
                    .route("/verify-email", web::post().to(verify_email::<U, R, H>))
                    .route("/login", web::post().to(login::<U, R, H>))
                    .route("/refresh", web::post().to(refresh::<U, R, H>))
                    .route("/forgot-password", web::post().to(forgot_password::<U, R, H>))
                    .route("/reset-password", web::post().to(reset_password::<U, R, H>))
                    .route(
                        "/logout",
                        web::post().to(logout::<U, R, H>).wrap(auth_guard),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sigil-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested endpoint does not exist"
    }))
}
