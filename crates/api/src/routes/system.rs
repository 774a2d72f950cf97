//! # 系统路由控制器
//!
//! 根路径自述信息与健康检查探针。

use axum::Json;

use crate::types::{HealthResponse, ServiceInfoResponse};

/// 服务自述信息
#[utoipa::path(
    get,
    path = "/",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "服务信息", body = ServiceInfoResponse)
    )
)]
pub async fn root() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "Stock Market Dashboard API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 健康检查
#[utoipa::path(
    get,
    path = "/health",
    tag = "系统 (System)",
    responses(
        (status = 200, description = "服务健康", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
