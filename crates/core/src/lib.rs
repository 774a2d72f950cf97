//! # `kabuka-core` - 领域核心层
//!
//! 定义股票看板系统的领域实体、端口契约 (Port) 与错误类型。
//! 本 crate 不包含任何具体实现：持久化由 `kabuka-store` 提供，
//! 行情合成与预测由 `kabuka-market` 提供，HTTP 接入由 `kabuka-api` 提供。

pub mod common;
pub mod config;
pub mod market;
pub mod store;
