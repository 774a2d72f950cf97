use crate::store::error::StoreError;
use thiserror::Error;

/// # Summary
/// 行情领域错误枚举。对请求而言全部为终态：不重试、不返回部分结果。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 存储层错误必须向上传播，不允许在领域层吞掉。
#[derive(Error, Debug)]
pub enum MarketError {
    // 未知的股票代码
    #[error("Company not found: {0}")]
    CompanyNotFound(String),
    // 请求依赖的数据尚不存在 (例如对无行情历史的代码做预测)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    // 底层存储失败，原样上抛
    #[error(transparent)]
    Store(#[from] StoreError),
}
