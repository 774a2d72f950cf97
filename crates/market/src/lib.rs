//! # `kabuka-market` - 行情合成与看板领域服务
//!
//! 本 crate 承载系统中全部"真实"计算逻辑：
//! - `generator`: 合成日线序列（乘性随机游走 + OHLC 抖动）
//! - `stats`: 推导统计（日环比涨跌、52 周高低点）
//! - `forecast`: 次日价格预测启发式（有界随机扰动）
//! - `service`: 实现 `kabuka_core::market::port::Dashboard` 的编排层，
//!   负责惰性种子化、"恰好生成一次"的互斥保护与预测历史配对。
//!
//! 所有随机性通过显式注入的 `rand::Rng` 提供，测试中可固定种子复现序列。

pub mod forecast;
pub mod generator;
pub mod seed;
pub mod service;
pub mod stats;
