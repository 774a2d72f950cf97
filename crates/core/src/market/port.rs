use crate::market::entity::{Company, DailyBar, PredictionOutcome, StockInfo};
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 看板领域服务契约，API 层唯一依赖的业务入口。
///
/// # Invariants
/// - 除 `predict` 外的所有操作不得追加预测记录。
/// - 某代码的行情序列一旦生成即永久复用，实现者必须保证"恰好生成一次"。
#[async_trait]
pub trait Dashboard: Send + Sync {
    /// # Summary
    /// 列出全部公司，存储为空时先写入默认种子数据。
    ///
    /// # Logic
    /// 1. 读取公司表。
    /// 2. 若为空则写入内置种子列表后重新读取。
    ///
    /// # Returns
    /// 公司列表。
    async fn list_companies(&self) -> Result<Vec<Company>, MarketError>;

    /// # Summary
    /// 按代码查询公司。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 匹配的公司，未知代码返回 `CompanyNotFound`。
    async fn get_company(&self, symbol: &str) -> Result<Company, MarketError>;

    /// # Summary
    /// 获取某代码最近 `days` 天的日线历史，首次调用时惰性合成并落库。
    ///
    /// # Logic
    /// 1. 校验公司存在、`days` 位于合法区间。
    /// 2. 在该代码的互斥闸内检查行情是否存在，缺失则合成并持久化。
    /// 3. 按日期倒序读取最多 `days` 条返回。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `days`: 请求的天数，必须位于 [1, 365]。
    ///
    /// # Returns
    /// 日期倒序的日线列表。
    async fn historical(&self, symbol: &str, days: u32) -> Result<Vec<DailyBar>, MarketError>;

    /// # Summary
    /// 获取个股即时概览（涨跌额/涨跌幅/52 周高低点等推导指标）。
    ///
    /// # Logic
    /// 1. 确保至少存在一根日线（缺失时合成单根）。
    /// 2. 与前一交易日收盘价比较计算涨跌。
    /// 3. 在最近 365 天窗口内求最高/最低价，空窗口回退到最新单根。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 推导完成的概览数据。
    async fn stock_info(&self, symbol: &str) -> Result<StockInfo, MarketError>;

    /// # Summary
    /// 生成一条次日价格预测并持久化。
    ///
    /// # Logic
    /// 1. 校验公司存在，且已有行情历史（否则 `InvalidRequest`，不写任何记录）。
    /// 2. 以最新收盘价为基准做有界随机扰动。
    /// 3. 追加一条预测记录后返回配对视图。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 本次预测的读取视图。
    async fn predict(&self, symbol: &str) -> Result<PredictionOutcome, MarketError>;

    /// # Summary
    /// 获取某代码最近 10 条预测历史（创建时间倒序）。
    ///
    /// # Logic
    /// 1. 读取最近的预测记录。
    /// 2. 每条与读取时刻的最新收盘价重新配对，方向标签即时重算。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    ///
    /// # Returns
    /// 预测视图列表，本操作不产生任何写入。
    async fn prediction_history(&self, symbol: &str)
    -> Result<Vec<PredictionOutcome>, MarketError>;
}
