//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use kabuka_core::market::entity::{Company, DailyBar, PredictionOutcome, StockInfo};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================
//  公司相关 DTO
// ============================================================

/// 公司参考数据 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    /// 股票代码
    #[schema(example = "RELIANCE")]
    pub symbol: String,
    /// 公司全名
    #[schema(example = "Reliance Industries Ltd")]
    pub name: String,
    /// 所属板块
    #[schema(example = "Oil & Gas")]
    pub sector: String,
    /// 市值
    #[schema(example = 1500000.0)]
    pub market_cap: f64,
    /// 市盈率
    #[schema(example = 25.5)]
    pub pe_ratio: f64,
    /// 股息率
    #[schema(example = 0.8)]
    pub dividend_yield: f64,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            symbol: company.symbol,
            name: company.name,
            sector: company.sector,
            market_cap: company.market_cap,
            pe_ratio: company.pe_ratio,
            dividend_yield: company.dividend_yield,
        }
    }
}

// ============================================================
//  行情相关 DTO
// ============================================================

/// 单日 OHLCV 行情 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyBarResponse {
    /// 交易日 (ISO 8601 日期)
    #[schema(example = "2026-08-23")]
    pub date: String,
    /// 开盘价
    #[schema(example = 1520.45)]
    pub open_price: f64,
    /// 最高价
    #[schema(example = 1544.1)]
    pub high_price: f64,
    /// 最低价
    #[schema(example = 1498.2)]
    pub low_price: f64,
    /// 收盘价
    #[schema(example = 1520.45)]
    pub close_price: f64,
    /// 成交量
    #[schema(example = 2483910_i64)]
    pub volume: i64,
}

impl From<DailyBar> for DailyBarResponse {
    fn from(bar: DailyBar) -> Self {
        Self {
            date: bar.date.format("%Y-%m-%d").to_string(),
            open_price: bar.open,
            high_price: bar.high,
            low_price: bar.low,
            close_price: bar.close,
            volume: bar.volume,
        }
    }
}

/// 个股即时概览 DTO - 对应 UI 中 Stock Info 卡片区域
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockInfoResponse {
    /// 股票代码
    #[schema(example = "RELIANCE")]
    pub symbol: String,
    /// 最新收盘价
    #[schema(example = 1520.45)]
    pub current_price: f64,
    /// 日环比涨跌额
    #[schema(example = -12.3)]
    pub change: f64,
    /// 日环比涨跌幅 (%)
    #[schema(example = -0.8)]
    pub change_percent: f64,
    /// 最新成交量
    #[schema(example = 2483910_i64)]
    pub volume: i64,
    /// 市值
    #[schema(example = 1500000.0)]
    pub market_cap: f64,
    /// 市盈率
    #[schema(example = 25.5)]
    pub pe_ratio: f64,
    /// 股息率
    #[schema(example = 0.8)]
    pub dividend_yield: f64,
    /// 52 周最高价
    #[schema(example = 1688.0)]
    pub week_52_high: f64,
    /// 52 周最低价
    #[schema(example = 1320.6)]
    pub week_52_low: f64,
}

impl From<StockInfo> for StockInfoResponse {
    fn from(info: StockInfo) -> Self {
        Self {
            symbol: info.symbol,
            current_price: info.current_price,
            change: info.change,
            change_percent: info.change_percent,
            volume: info.volume,
            market_cap: info.market_cap,
            pe_ratio: info.pe_ratio,
            dividend_yield: info.dividend_yield,
            week_52_high: info.week_52_high,
            week_52_low: info.week_52_low,
        }
    }
}

// ============================================================
//  预测相关 DTO
// ============================================================

/// 次日价格预测 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    /// 股票代码
    #[schema(example = "RELIANCE")]
    pub symbol: String,
    /// 预测价格
    #[schema(example = 1587.22)]
    pub predicted_price: f64,
    /// 置信度 (随机装饰值，不具统计意义)
    #[schema(example = 0.815)]
    pub confidence: f64,
    /// 预测目标日 (ISO 8601 日期)
    #[schema(example = "2026-08-24")]
    pub prediction_date: String,
    /// 读取时刻的最新收盘价
    #[schema(example = 1520.45)]
    pub current_price: f64,
    /// 方向标签 (读取时即时推导)
    #[schema(example = "UP")]
    pub price_direction: String,
}

impl From<PredictionOutcome> for PredictionResponse {
    fn from(outcome: PredictionOutcome) -> Self {
        Self {
            symbol: outcome.symbol,
            predicted_price: outcome.predicted_price,
            confidence: outcome.confidence,
            prediction_date: outcome.target_date.format("%Y-%m-%d").to_string(),
            current_price: outcome.current_price,
            price_direction: outcome.direction.to_string(),
        }
    }
}

// ============================================================
//  系统 DTO
// ============================================================

/// 服务自述信息 DTO (根路径)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfoResponse {
    /// 服务名称
    #[schema(example = "Stock Market Dashboard API")]
    pub message: String,
    /// 版本号
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// 健康检查 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 固定为 "healthy"
    #[schema(example = "healthy")]
    pub status: String,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
