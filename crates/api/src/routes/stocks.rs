//! # 行情路由控制器
//!
//! 实现 `/api/stocks/{symbol}` 路径下的 REST 接口：
//! 历史日线（首次访问惰性合成）与即时概览（推导统计）。

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, DailyBarResponse, StockInfoResponse};

// 未显式指定时的默认历史天数
const DEFAULT_HISTORY_DAYS: u32 = 30;

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoricalQuery {
    /// 请求的历史天数，省略时为 30
    pub days: Option<u32>,
}

/// 获取历史日线
///
/// 首次访问某代码时合成一段随机游走序列并落库，之后的调用
/// 始终返回已持久化的行（生成一次、永久复用），按日期倒序。
#[utoipa::path(
    get,
    path = "/api/stocks/{symbol}/historical",
    tag = "行情 (Stocks)",
    params(
        ("symbol" = String, Path, description = "股票代码"),
        ("days" = Option<u32>, Query, description = "历史天数，位于 [1, 365]，默认 30")
    ),
    responses(
        (status = 200, description = "成功获取历史日线", body = ApiResponse<Vec<DailyBarResponse>>),
        (status = 400, description = "days 超出合法区间"),
        (status = 404, description = "公司不存在")
    )
)]
pub async fn get_historical(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoricalQuery>,
) -> Result<Json<ApiResponse<Vec<DailyBarResponse>>>, ApiError> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    let bars = state.dashboard.historical(&symbol, days).await?;
    let response: Vec<DailyBarResponse> = bars.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(response)))
}

/// 获取个股即时概览
///
/// 返回最新价、日环比涨跌、52 周高低点及公司参考指标。
/// 某代码尚无任何行情时会先合成单根日线。
#[utoipa::path(
    get,
    path = "/api/stocks/{symbol}/info",
    tag = "行情 (Stocks)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "成功获取概览", body = ApiResponse<StockInfoResponse>),
        (status = 404, description = "公司不存在")
    )
)]
pub async fn get_stock_info(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockInfoResponse>>, ApiError> {
    let info = state.dashboard.stock_info(&symbol).await?;
    Ok(Json(ApiResponse::ok(info.into())))
}
