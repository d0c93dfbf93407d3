use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::time::Instant;
use tracing::warn;

use crate::services::RankService;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// GET /health
pub async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/ready - round trip to the leaderboard store
pub async fn readiness_check(service: web::Data<RankService>) -> impl Responder {
    let started = Instant::now();
    match service.store().ping().await {
        Ok(()) => HttpResponse::Ok().json(ReadinessResponse {
            ready: true,
            store: "healthy",
            latency_ms: Some(started.elapsed().as_millis() as u64),
            message: None,
        }),
        Err(e) => {
            warn!(error = %e, "Leaderboard store readiness check failed");
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                ready: false,
                store: "unhealthy",
                latency_ms: None,
                message: Some(e.to_string()),
            })
        }
    }
}
