use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// 上市公司实体，包含静态的参考信息。
///
/// # Invariants
/// - `symbol` 必须全局唯一，种子化后只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    // 股票代码 (例如: RELIANCE, TCS)
    pub symbol: String,
    // 公司全名
    pub name: String,
    // 所属板块/行业
    pub sector: String,
    // 市值
    pub market_cap: f64,
    // 市盈率
    pub pe_ratio: f64,
    // 股息率
    pub dividend_yield: f64,
    // 入库时间
    pub created_at: DateTime<Utc>,
}

/// # Summary
/// 单日 OHLCV 行情实体，每个交易代码按日期构成有序序列。
///
/// # Invariants
/// - 合成器结构上保证 `low <= open <= high`。
/// - `close` 与 `high`/`low` 之间不做跨字段约束（合成数据的既定宽松语义）。
/// - 同一代码下日期不重复。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    // 股票代码
    pub symbol: String,
    // 交易日
    pub date: NaiveDate,
    // 开盘价 (两位小数)
    pub open: f64,
    // 最高价 (两位小数)
    pub high: f64,
    // 最低价 (两位小数)
    pub low: f64,
    // 收盘价 (两位小数)
    pub close: f64,
    // 成交量
    pub volume: i64,
}

/// # Summary
/// 次日价格预测实体，按代码形成只追加的历史记录。
///
/// # Invariants
/// - `confidence` 位于 [0.65, 0.92] 区间，保留三位小数。
/// - 记录一旦写入不再修改或删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    // 股票代码
    pub symbol: String,
    // 预测价格 (两位小数)
    pub predicted_price: f64,
    // 置信度 (三位小数，随机装饰值，不具统计意义)
    pub confidence: f64,
    // 预测目标日 (生成时刻的次日)
    pub target_date: NaiveDate,
    // 生成时间
    pub created_at: DateTime<Utc>,
}

/// # Summary
/// 个股即时概览，由最新行情与公司参考数据按需推导，不持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInfo {
    // 股票代码
    pub symbol: String,
    // 最新收盘价
    pub current_price: f64,
    // 相对前一交易日的涨跌额 (两位小数)
    pub change: f64,
    // 相对前一交易日的涨跌幅百分比 (两位小数)
    pub change_percent: f64,
    // 最新成交量
    pub volume: i64,
    // 市值
    pub market_cap: f64,
    // 市盈率
    pub pe_ratio: f64,
    // 股息率
    pub dividend_yield: f64,
    // 52 周最高价
    pub week_52_high: f64,
    // 52 周最低价
    pub week_52_low: f64,
}

/// # Summary
/// 预测方向标签。读取时根据当前最新收盘价重新推导，从不落库。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// # Summary
/// 面向读取的预测视图：持久化的预测记录与读取时刻的最新价配对。
///
/// # Invariants
/// - `direction` 由 `predicted_price` 与 `current_price` 即时比较得出，
///   随着新行情累积同一条预测的方向标签可能回溯变化（既定可观察行为）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    // 股票代码
    pub symbol: String,
    // 预测价格
    pub predicted_price: f64,
    // 置信度
    pub confidence: f64,
    // 预测目标日
    pub target_date: NaiveDate,
    // 读取时刻的最新收盘价 (无行情时为 0)
    pub current_price: f64,
    // 即时推导的方向标签
    pub direction: Direction,
}

impl PredictionOutcome {
    /// # Summary
    /// 将持久化的预测记录与当前最新价配对，即时推导方向标签。
    ///
    /// # Logic
    /// 1. 预测价高于当前价 => `Up`，否则 => `Down`。
    ///
    /// # Arguments
    /// * `prediction` - 持久化的预测记录。
    /// * `current_price` - 读取时刻的最新收盘价。
    ///
    /// # Returns
    /// * 配对完成的读取视图。
    #[must_use]
    pub fn pair(prediction: &Prediction, current_price: f64) -> Self {
        let direction = if prediction.predicted_price > current_price {
            Direction::Up
        } else {
            Direction::Down
        };
        Self {
            symbol: prediction.symbol.clone(),
            predicted_price: prediction.predicted_price,
            confidence: prediction.confidence,
            target_date: prediction.target_date,
            current_price,
            direction,
        }
    }
}
