use std::net::SocketAddr;
use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::token::dispatcher::NotificationDispatcher;
use account_service::domain::token::service::TokenService;
use account_service::domain::user::service::CredentialService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::notifications::LogNotificationSink;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use auth::SystemClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    config.validate()?;
    let lifetimes = config.jwt.lifetimes()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        access_ttl_seconds = config.jwt.access_ttl_seconds,
        refresh_ttl_seconds = config.jwt.refresh_ttl_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let notifier = NotificationDispatcher::spawn(Arc::new(LogNotificationSink::new()));

    let credential_service = Arc::new(CredentialService::new(Arc::clone(&user_repository)));
    let token_service = Arc::new(TokenService::new(
        user_repository,
        authenticator,
        Arc::new(SystemClock),
        notifier,
        lifetimes,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, token_service);

    axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    tracing::info!("Server exited");
    Ok(())
}
