//! Sigil API server binary
//!
//! Wires the MySQL repositories, the bcrypt hasher, the token codec and
//! the configured mailer into the application factory, then runs the
//! HTTP server.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use chrono::Utc;
use dotenvy::dotenv;
use log::{error, info};

use sigil_api::app::create_app;
use sigil_api::routes::auth::AppState;
use sigil_core::services::{
    Mailer, RefreshTokenStore, SessionIssuer, SignedTokenCodec, TokenConfig,
    VerificationTokenService,
};
use sigil_infra::database::{DatabasePool, MySqlRefreshTokenRepository, MySqlUserRepository};
use sigil_infra::mail::create_mailer;
use sigil_infra::security::BcryptPasswordHasher;
use sigil_shared::config::AppConfig;

/// How often the background sweep clears expired refresh token records.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Sigil API server");

    let config = AppConfig::from_env();

    if config.environment.is_production() && config.auth.jwt.is_using_default_secret() {
        error!("Refusing to start: JWT_SECRET is unset in a production environment");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "JWT_SECRET must be set in production",
        ));
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .expect("Failed to connect to the database");
    info!("Database pool ready: {}", pool.get_statistics());

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let tokens = Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone()));
    let hasher = Arc::new(BcryptPasswordHasher::with_default_cost());
    let codec = Arc::new(SignedTokenCodec::new(TokenConfig::from_jwt(&config.auth.jwt)));

    // The signing secret doubles as the hash key for stored refresh tokens
    let store = RefreshTokenStore::new(Arc::clone(&tokens), config.auth.jwt.secret.clone());
    let sessions = Arc::new(SessionIssuer::new(
        Arc::clone(&users),
        Arc::clone(&codec),
        store.clone(),
    ));
    let verification = Arc::new(VerificationTokenService::new(
        Arc::clone(&users),
        store.clone(),
        Arc::clone(&hasher),
        config.auth.verification.clone(),
    ));

    let mailer: Arc<dyn Mailer> = Arc::from(create_mailer(&config.mail));
    info!("Mail delivery via the '{}' provider", mailer.provider_name());

    spawn_expiry_sweep(store.clone());

    let app_state = web::Data::new(AppState {
        users,
        hasher,
        codec,
        sessions,
        verification,
        mailer,
        session_config: config.auth.session.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}

/// Periodically remove expired refresh token records.
///
/// The store already drops expired records it happens to read during a
/// refresh. This sweep only keeps rows for users who never came back
/// from accumulating.
fn spawn_expiry_sweep(store: RefreshTokenStore<MySqlRefreshTokenRepository>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            match store.delete_expired(Utc::now()).await {
                Ok(0) => {}
                Ok(removed) => info!("Swept {} expired refresh token records", removed),
                Err(e) => error!("Expired token sweep failed: {}", e),
            }
        }
    });
}
