use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use portal_backend::{
    background_task::start_purge_task,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    repositories::memory::MemoryStore,
    routes::configure_routes,
    seed::seed_defaults,
    settings::{AppConfig, StoreKind},
    shared_repos::SharedRepositories,
    telemetry::init_tracing,
    AppState,
};

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }
    origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.is_production());
    tracing::info!("Loaded configuration: {:?}", config);

    let repos = match config.store {
        StoreKind::Postgres => {
            let pool = create_pool(&config.database_url, config.worker_count as u32 * 2)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create database connection pool: {}", e);
                    std::io::Error::other(e)
                })?;
            run_migrations(&pool).await.map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                std::io::Error::other(e)
            })?;
            SharedRepositories::postgres(pool)
        }
        StoreKind::Memory => {
            tracing::warn!("Using the in-process store; data is lost on restart");
            SharedRepositories::in_memory(Arc::new(MemoryStore::new()))
        }
    };

    let app_state = web::Data::new(AppState::new(&config, repos.clone()));

    if let Err(e) = seed_defaults(&config, &app_state, &repos).await {
        tracing::error!("Seeding failed: {}", e);
        std::process::exit(1);
    }

    app_state.contact_limiter.spawn_eviction();
    tokio::spawn(start_purge_task(app_state.auth_handler.token_service.revocation_list()));

    let server_addr = format!("{}:{}", config.host, config.port);
    let origins = config.cors_origins();

    tracing::info!(
        "🚀 Starting {} v{} on {} with {} workers",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.worker_count
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(cors(&origins))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
