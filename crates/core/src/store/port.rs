use super::error::StoreError;
use crate::market::entity::{Company, DailyBar, Prediction};
use async_trait::async_trait;
use chrono::NaiveDate;

/// # Summary
/// 公司参考数据存储接口。
///
/// # Invariants
/// - `symbol` 为主键，重复写入以覆盖语义处理。
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// # Summary
    /// 列出全部公司。
    ///
    /// # Returns
    /// 公司列表，可能为空。
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;

    /// # Summary
    /// 按代码查询公司。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 匹配的公司或 None。
    async fn get_company(&self, symbol: &str) -> Result<Option<Company>, StoreError>;

    /// # Summary
    /// 批量写入公司（用于一次性种子化）。
    ///
    /// # Arguments
    /// * `companies`: 待写入的公司列表。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    async fn save_companies(&self, companies: &[Company]) -> Result<(), StoreError>;
}

/// # Summary
/// 日线行情存储接口，负责合成序列的持久化与各类窗口读取。
///
/// # Invariants
/// - 同一 `(symbol, date)` 组合至多一条记录。
#[async_trait]
pub trait BarStore: Send + Sync {
    /// # Summary
    /// 批量保存日线数据。
    ///
    /// # Arguments
    /// * `bars`: 待保存的日线列表。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    async fn save_bars(&self, bars: &[DailyBar]) -> Result<(), StoreError>;

    /// # Summary
    /// 判断某代码是否已有任何日线记录。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 存在则 true。
    async fn has_bars(&self, symbol: &str) -> Result<bool, StoreError>;

    /// # Summary
    /// 按日期倒序读取某代码最近的日线。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `limit`: 返回条数上限。
    ///
    /// # Returns
    /// 日期倒序的日线列表。
    async fn recent_bars(&self, symbol: &str, limit: u32) -> Result<Vec<DailyBar>, StoreError>;

    /// # Summary
    /// 读取某代码日期最新的一根日线。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 最新日线或 None。
    async fn latest_bar(&self, symbol: &str) -> Result<Option<DailyBar>, StoreError>;

    /// # Summary
    /// 读取严格早于指定日期的最近一根日线（用于日环比计算）。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `date`: 比较基准日（不含）。
    ///
    /// # Returns
    /// 前一交易日日线或 None。
    async fn bar_before(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyBar>, StoreError>;

    /// # Summary
    /// 按日期升序读取某日期（含）之后的全部日线（用于 52 周窗口）。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `since`: 窗口起始日（含）。
    ///
    /// # Returns
    /// 日期升序的日线列表。
    async fn bars_since(
        &self,
        symbol: &str,
        since: NaiveDate,
    ) -> Result<Vec<DailyBar>, StoreError>;
}

/// # Summary
/// 预测记录存储接口，只追加、不修改、不删除。
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// # Summary
    /// 追加一条预测记录。
    ///
    /// # Arguments
    /// * `prediction`: 待追加的预测实体。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    async fn append_prediction(&self, prediction: &Prediction) -> Result<(), StoreError>;

    /// # Summary
    /// 按创建时间倒序读取某代码最近的预测记录。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `limit`: 返回条数上限。
    ///
    /// # Returns
    /// 创建时间倒序的预测列表。
    async fn recent_predictions(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<Prediction>, StoreError>;
}
