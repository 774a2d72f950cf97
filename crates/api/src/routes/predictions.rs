//! # 预测路由控制器
//!
//! 实现 `/api/predictions/{symbol}` 路径下的 REST 接口。
//! `predict` 是系统中唯一追加预测记录的写路径；
//! `history` 为纯读取，方向标签按读取时刻的最新价即时重算。

use axum::Json;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, PredictionResponse};

/// 生成次日价格预测
///
/// 以最新收盘价为基准做 ±8% 有界随机扰动并持久化一条预测记录。
/// 未知代码返回 404；已知代码但尚无行情历史返回 400，且不写任何记录。
#[utoipa::path(
    get,
    path = "/api/predictions/{symbol}/predict",
    tag = "预测 (Predictions)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "预测成功", body = ApiResponse<PredictionResponse>),
        (status = 400, description = "无行情历史可供预测"),
        (status = 404, description = "公司不存在")
    )
)]
pub async fn predict(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<PredictionResponse>>, ApiError> {
    let outcome = state.dashboard.predict(&symbol).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// 获取预测历史
///
/// 返回最近 10 条预测（创建时间倒序）。每条的方向标签以读取时刻
/// 的最新收盘价重新推导，会随新行情累积而回溯变化（既定行为）。
#[utoipa::path(
    get,
    path = "/api/predictions/{symbol}/history",
    tag = "预测 (Predictions)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "成功获取预测历史", body = ApiResponse<Vec<PredictionResponse>>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn prediction_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Vec<PredictionResponse>>>, ApiError> {
    let outcomes = state.dashboard.prediction_history(&symbol).await?;
    let response: Vec<PredictionResponse> = outcomes.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(response)))
}
