use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize, ts_rs::TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
}

pub async fn health(start_time: web::Data<AppStartTime>) -> ActixResult<HttpResponse> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(start_time.start_datetime)
        .num_seconds();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
        },
        "Service is healthy",
    )))
}

// 配置路由
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/health", web::get().to(health));
}
