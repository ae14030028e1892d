use anyhow::Context;
use tracing_subscriber::EnvFilter;

use school_api::auth::TokenService;
use school_api::config::AppConfig;
use school_api::database::Database;
use school_api::routes;
use school_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("school_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    config.validate()?;
    tracing::info!("Starting School API in {:?} mode", config.environment);

    let db = Database::connect_lazy(&config.database)?;
    if config.database.run_migrations {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let tokens = TokenService::new(
        &config.jwt_secret()?,
        chrono::Duration::hours(config.security.jwt_expiry_hours),
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::app(AppState::new(config, db, tokens));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("School API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
