//! Gateway Health API
//!
//! Liveness endpoint for load balancers and the `mathlens status` command.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`.
pub async fn get_health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: Utc::now(),
    })
}
