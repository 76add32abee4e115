use axum::http::{header, Method};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inkwell_api::config::{Config, StorageBackend};
use inkwell_api::{build_router, build_schema, AuthConfig, AuthService, Store};

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([
                        header::AUTHORIZATION,
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        header::ORIGIN,
                    ])
                    .max_age(Duration::from_secs(3600))
            }
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// Connect to the configured backend, running migrations for PostgreSQL
async fn open_store(config: &Config) -> anyhow::Result<Store> {
    match config.storage {
        StorageBackend::Postgres => {
            let database = config.database();
            tracing::info!("Connecting to database...");

            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .min_connections(database.min_connections)
                .acquire_timeout(Duration::from_secs(database.connect_timeout_secs))
                .idle_timeout(Duration::from_secs(database.idle_timeout_secs))
                .connect(&database.url)
                .await?;

            tracing::info!("Database connection established");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations completed successfully");

            Ok(Store::postgres(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; all data is lost on shutdown");
            Ok(Store::in_memory())
        }
    }
}

/// Turn the configured log level into a tracing filter
///
/// A bare level such as `debug` applies to the server and HTTP layers; anything
/// else is taken as a full filter directive.
fn log_filter(log_level: &str) -> EnvFilter {
    let level = log_level.trim();
    let directives = if level.parse::<LevelFilter>().is_ok() {
        format!("inkwell_api={level},tower_http={level}")
    } else {
        level.to_string()
    };
    EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}, falling back to info", log_level, e);
        EnvFilter::new("inkwell_api=info,tower_http=info")
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(log_filter(&config.common.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.uses_development_secret() {
        tracing::warn!(
            "JWT_SECRET not set, using insecure default. \
             This is only acceptable in development mode."
        );
    }

    tracing::info!(
        environment = %config.environment(),
        storage = %config.storage,
        "Starting Inkwell API server on port {}",
        config.port
    );

    let store = open_store(&config).await?;

    let auth_service = AuthService::new(store.users.clone(), AuthConfig::from_config(&config))?;
    tracing::info!(
        token_ttl_secs = auth_service.config().token_ttl_secs,
        "AuthService initialized"
    );

    let schema = build_schema(store.clone(), auth_service.clone());
    tracing::info!("GraphQL schema built");

    let cors_layer = build_cors_layer(&config);
    let app = build_router(schema, auth_service, store, cors_layer);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL Playground available at http://{}:{}/graphql/playground",
        addr.ip(),
        addr.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
