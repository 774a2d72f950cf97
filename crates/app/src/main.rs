use std::path::PathBuf;
use std::sync::Arc;

use kabuka_api::server::{AppState, start_server};
use kabuka_core::config::AppConfig;
use kabuka_core::store::port::{BarStore, CompanyStore, PredictionStore};
use kabuka_market::service::DashboardService;
use kabuka_store::dashboard::SqliteDashboardStore;
use tracing::info;

/// # Summary
/// 加载应用配置：默认值 <- 可选配置文件 (kabuka.toml) <- KABUKA__ 环境变量。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 的各字段作为兜底默认值。
/// 2. 叠加工作目录下可选的 `kabuka.toml`。
/// 3. 叠加 `KABUKA__SERVER__PORT` 这类双下划线分隔的环境变量。
///
/// # Returns
/// * 解析完成的 `AppConfig`。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    let defaults = AppConfig::default();
    let settings = config::Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("database.data_dir", defaults.database.data_dir)?
        .add_source(config::File::with_name("kabuka").required(false))
        .add_source(config::Environment::with_prefix("KABUKA").separator("__"))
        .build()?;
    settings.try_deserialize()
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载配置并设置存储根目录。
/// 3. 实例化基础设施层（SQLite 存储）。
/// 4. 构造领域服务层（DashboardService）。
/// 5. 启动 HTTP 服务对外提供接口。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    info!("Kabuka dashboard starting...");

    // 2. 加载配置
    let app_config = load_config()?;
    kabuka_store::config::set_root_dir(PathBuf::from(&app_config.database.data_dir));

    // 3. 实例化基础设施层（三个端口共享同一个 SQLite 存储）
    let store = Arc::new(SqliteDashboardStore::new().await?);
    let companies: Arc<dyn CompanyStore> = store.clone();
    let bars: Arc<dyn BarStore> = store.clone();
    let predictions: Arc<dyn PredictionStore> = store;

    // 4. 构造领域服务层（注入 Core Trait 抽象）
    let dashboard = DashboardService::new(companies, bars, predictions);

    // 5. 启动 HTTP 服务
    let bind_addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let state = AppState { dashboard };
    start_server(state, &bind_addr).await?;

    Ok(())
}
