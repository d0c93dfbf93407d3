use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use leaderboard_service::{
    config::StoreBackend, handlers, Config, LeaderboardStore, MemoryLeaderboardStore,
    RankService, RedisLeaderboardStore,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load config")?;

    info!(
        "Starting {} on {}:{}",
        config.service.service_name, config.service.http_host, config.service.http_port
    );

    let store: Arc<dyn LeaderboardStore> = match config.service.store_backend {
        StoreBackend::Redis => Arc::new(
            RedisLeaderboardStore::connect(&config.redis.redis_url, config.redis.command_timeout())
                .await?,
        ),
        StoreBackend::Memory => {
            warn!("Using in-memory leaderboard store - scores are lost on restart");
            Arc::new(MemoryLeaderboardStore::new())
        }
    };

    let rank_service = web::Data::new(RankService::new(store));

    // actix-web stops gracefully on SIGTERM / Ctrl-C
    HttpServer::new(move || {
        App::new()
            .app_data(rank_service.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind((config.service.http_host.as_str(), config.service.http_port))
    .with_context(|| {
        format!(
            "Failed to bind {}:{}",
            config.service.http_host, config.service.http_port
        )
    })?
    .workers(config.service.http_workers)
    .run()
    .await
    .context("HTTP server error")?;

    info!("{} shut down", config.service.service_name);
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,actix_web=info".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
