//! # `kabuka-api` - HTTP API 网关
//!
//! 本 crate 是股票看板演示服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自前端或浏览器的 HTTP 请求
//! - 调用下层 `Dashboard` 端口完成业务操作
//! - 将领域模型转换为 DTO 返回给前端
//! - 将领域错误统一映射到 HTTP 状态码（未知代码 404，非法请求 400）

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
