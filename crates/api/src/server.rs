//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use kabuka_core::market::port::Dashboard;

use crate::routes::{companies, predictions, stocks, system};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `dashboard` 在服务启动前由 DI 容器注入，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 看板领域服务端口
    pub dashboard: Arc<dyn Dashboard>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Market Dashboard API",
        version = "0.1.0",
        description = "股票看板演示服务：公司参考数据、合成历史行情、推导统计与次日随机预测。",
        license(name = "MIT")
    ),
    tags(
        (name = "系统 (System)", description = "服务自述与健康检查"),
        (name = "公司 (Companies)", description = "公司参考数据查询（首次访问自动种子化）"),
        (name = "行情 (Stocks)", description = "合成历史日线与个股即时概览"),
        (name = "预测 (Predictions)", description = "次日价格预测的生成与历史查询")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 组装完整的 axum 路由树与 OpenAPI 文档。
///
/// 拆出独立函数以便集成测试在任意监听端口上复用同一棵路由树。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
///
/// # Returns
/// * 挂载完 Swagger UI 与 CORS 的 `Router`
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(system::root))
        .routes(routes!(system::health_check))
        .routes(routes!(companies::get_companies))
        .routes(routes!(companies::get_company))
        .routes(routes!(stocks::get_historical))
        .routes(routes!(stocks::get_stock_info))
        .routes(routes!(predictions::predict))
        .routes(routes!(predictions::prediction_history))
        .with_state(state)
        .split_for_parts();

    // 配置 CORS (演示服务允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 构建路由并绑定 TCP 端口启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8000"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Dashboard API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received. Exiting...");
            }
        })
        .await?;

    Ok(())
}
