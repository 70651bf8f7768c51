//! ShipTrack Server — Courier/Shipment Tracking Backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use shiptrack_api::state::AppState;
use shiptrack_core::config::AppConfig;
use shiptrack_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("SHIPTRACK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ShipTrack v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = shiptrack_database::connection::DatabasePool::connect(&config.database).await?;
    shiptrack_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(shiptrack_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let shipment_repo = Arc::new(
        shiptrack_database::repositories::shipment::ShipmentRepository::new(db_pool.clone()),
    );
    let notification_repo = Arc::new(
        shiptrack_database::repositories::notification::NotificationRepository::new(
            db_pool.clone(),
        ),
    );

    // ── Step 3: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(shiptrack_auth::password::hasher::PasswordHasher::new());
    let jwt_encoder = Arc::new(shiptrack_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(shiptrack_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 4: Services ─────────────────────────────────────────
    let mailer = Arc::new(shiptrack_service::mailer::client::HttpMailer::new(
        &config.mailer,
    )?);

    let account_service = Arc::new(shiptrack_service::account::AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        mailer,
        config.auth.clone(),
    ));

    let shipment_service = Arc::new(shiptrack_service::shipment::ShipmentService::new(
        Arc::clone(&shipment_repo),
        Arc::clone(&notification_repo),
        Arc::clone(&user_repo),
    ));

    let notification_service = Arc::new(shiptrack_service::notification::NotificationService::new(
        Arc::clone(&notification_repo),
    ));

    // ── Step 5: Seed the administrator account ───────────────────
    account_service.seed_admin().await?;

    // ── Step 6: Build and serve the app ──────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        db_pool: db_pool.clone(),
        jwt_encoder,
        jwt_decoder,
        shipment_service,
        notification_service,
        account_service,
    };

    let app = shiptrack_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
