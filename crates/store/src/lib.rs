//! # `kabuka-store` - SQLite 持久化层
//!
//! 以 `sqlx` 实现 `kabuka-core` 定义的三个存储端口
//! (`CompanyStore` / `BarStore` / `PredictionStore`)。
//! 全部数据集中在数据根目录下单个 `dashboard.db` 文件中。

pub mod config;
pub mod dashboard;
