use std::sync::Arc;

use auth_service::auth::service::AuthService;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::notifier::LogResetNotifier;
use auth_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_minutes = config.tokens.access_ttl_minutes,
        refresh_ttl_days = config.tokens.refresh_ttl_days,
        reset_ttl_minutes = config.tokens.reset_ttl_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let notifier = Arc::new(LogResetNotifier);
    let auth_service = Arc::new(AuthService::new(user_store, notifier, &config.tokens)?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
