//! # 公司参考数据路由控制器
//!
//! 实现 `/api/companies` 路径下的 REST 接口。
//! 公司数据种子化一次后只读，列表接口在空库时触发种子写入。

use axum::Json;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, CompanyResponse};

/// 获取全部公司列表
///
/// 首次调用且存储为空时，自动写入 12 家默认种子公司后返回。
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "公司 (Companies)",
    responses(
        (status = 200, description = "成功获取公司列表", body = ApiResponse<Vec<CompanyResponse>>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn get_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CompanyResponse>>>, ApiError> {
    let companies = state.dashboard.list_companies().await?;
    let response: Vec<CompanyResponse> = companies.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(response)))
}

/// 按代码查询公司
#[utoipa::path(
    get,
    path = "/api/companies/{symbol}",
    tag = "公司 (Companies)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "成功获取公司", body = ApiResponse<CompanyResponse>),
        (status = 404, description = "公司不存在")
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<CompanyResponse>>, ApiError> {
    let company = state.dashboard.get_company(&symbol).await?;
    Ok(Json(ApiResponse::ok(company.into())))
}
