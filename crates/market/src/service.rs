use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{debug, info};

use kabuka_core::common::time::{RealTimeProvider, TimeProvider};
use kabuka_core::market::entity::{Company, DailyBar, Prediction, PredictionOutcome, StockInfo};
use kabuka_core::market::error::MarketError;
use kabuka_core::market::port::Dashboard;
use kabuka_core::store::error::StoreError;
use kabuka_core::store::port::{BarStore, CompanyStore, PredictionStore};

use crate::{forecast, generator, seed, stats};

// 历史查询允许的最大天数（超出视为非法请求）
const HISTORY_DAYS_MAX: u32 = 365;
// 52 周高低点的回看窗口（日历日）
const WEEK_52_WINDOW_DAYS: i64 = 365;
// 预测历史单次返回条数上限
const PREDICTION_HISTORY_LIMIT: u32 = 10;

/// # Summary
/// 看板领域服务的具体实现类，`Dashboard` 端口的唯一实现。
///
/// # Invariants
/// - 每个代码持有独立的异步互斥闸，"检查-合成-落库"序列在闸内执行，
///   保证任意代码的行情序列恰好合成一次。
/// - 随机源集中持有并显式注入到合成器与预测启发式，测试可固定种子。
pub struct DashboardService {
    // 公司参考数据存储
    companies: Arc<dyn CompanyStore>,
    // 日线行情存储
    bars: Arc<dyn BarStore>,
    // 预测记录存储
    predictions: Arc<dyn PredictionStore>,
    // 时间供给器（测试中可替换为虚拟时钟）
    clock: Arc<dyn TimeProvider>,
    // 集中持有的随机源
    rng: Mutex<StdRng>,
    // 代码级互斥闸注册表，Key 为 Symbol
    symbol_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DashboardService {
    /// # Summary
    /// 以真实时钟与操作系统熵源构造服务实例。
    ///
    /// # Arguments
    /// * `companies` - 公司存储实现。
    /// * `bars` - 日线存储实现。
    /// * `predictions` - 预测存储实现。
    ///
    /// # Returns
    /// 服务实例的共享指针。
    pub fn new(
        companies: Arc<dyn CompanyStore>,
        bars: Arc<dyn BarStore>,
        predictions: Arc<dyn PredictionStore>,
    ) -> Arc<Self> {
        Self::with_clock_and_rng(
            companies,
            bars,
            predictions,
            Arc::new(RealTimeProvider),
            StdRng::from_os_rng(),
        )
    }

    /// # Summary
    /// 显式注入时钟与随机源的构造器，供测试固定日期与种子。
    ///
    /// # Arguments
    /// * `clock` - 时间供给器。
    /// * `rng` - 预置的随机源（固定种子即可复现合成序列与预测）。
    ///
    /// # Returns
    /// 服务实例的共享指针。
    pub fn with_clock_and_rng(
        companies: Arc<dyn CompanyStore>,
        bars: Arc<dyn BarStore>,
        predictions: Arc<dyn PredictionStore>,
        clock: Arc<dyn TimeProvider>,
        rng: StdRng,
    ) -> Arc<Self> {
        Arc::new(Self {
            companies,
            bars,
            predictions,
            clock,
            rng: Mutex::new(rng),
            symbol_locks: DashMap::new(),
        })
    }

    /// 获取或创建某代码的互斥闸
    fn symbol_lock(&self, symbol: &str) -> Arc<Mutex<()>> {
        self.symbol_locks
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// # Summary
    /// 校验公司存在，未知代码返回 `CompanyNotFound`。
    async fn require_company(&self, symbol: &str) -> Result<Company, MarketError> {
        self.companies
            .get_company(symbol)
            .await?
            .ok_or_else(|| MarketError::CompanyNotFound(symbol.to_string()))
    }

    /// # Summary
    /// 确保某代码已有行情历史，缺失时在互斥闸内合成并落库。
    ///
    /// # Logic
    /// 1. 获取该代码的互斥闸并持有至落库完成，消除"检查-再执行"竞态。
    /// 2. 闸内二次检查：已有记录则直接返回（生成一次、永久复用）。
    /// 3. 以注入时钟的"今天"为终点合成 `days` 天序列并批量落库。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    /// * `days` - 首次合成的序列长度。
    async fn ensure_history(&self, symbol: &str, days: u32) -> Result<(), MarketError> {
        let lock = self.symbol_lock(symbol);
        let _guard = lock.lock().await;

        if self.bars.has_bars(symbol).await? {
            debug!("History already present for {}, skipping generation", symbol);
            return Ok(());
        }

        let today = self.clock.today();
        let series = {
            let mut rng = self.rng.lock().await;
            generator::generate_series(&mut *rng, symbol, today, days)
        };
        self.bars.save_bars(&series).await?;
        info!("Generated {} synthetic bars for {}", series.len(), symbol);
        Ok(())
    }

    /// 读取最新日线，理论上 `ensure_history` 之后必然存在
    async fn require_latest_bar(&self, symbol: &str) -> Result<DailyBar, MarketError> {
        self.bars
            .latest_bar(symbol)
            .await?
            .ok_or(MarketError::Store(StoreError::NotFound))
    }
}

#[async_trait]
impl Dashboard for DashboardService {
    /// # Summary
    /// 列出全部公司，存储为空时先写入 12 家默认种子公司。
    async fn list_companies(&self) -> Result<Vec<Company>, MarketError> {
        let companies = self.companies.list_companies().await?;
        if !companies.is_empty() {
            return Ok(companies);
        }

        let seeded = seed::default_companies(self.clock.now());
        self.companies.save_companies(&seeded).await?;
        info!("Seeded {} default companies", seeded.len());
        Ok(self.companies.list_companies().await?)
    }

    /// # Summary
    /// 按代码查询公司。
    async fn get_company(&self, symbol: &str) -> Result<Company, MarketError> {
        self.require_company(symbol).await
    }

    /// # Summary
    /// 获取最近 `days` 天历史，首次调用惰性合成。
    ///
    /// # Logic
    /// 1. 校验公司存在与 `days` 区间。
    /// 2. `ensure_history` 保证序列存在（恰好一次）。
    /// 3. 统一从存储按日期倒序读取，首次与后续调用返回完全一致的行。
    async fn historical(&self, symbol: &str, days: u32) -> Result<Vec<DailyBar>, MarketError> {
        if days == 0 || days > HISTORY_DAYS_MAX {
            return Err(MarketError::InvalidRequest(format!(
                "days must be within [1, {}], got {}",
                HISTORY_DAYS_MAX, days
            )));
        }
        self.require_company(symbol).await?;

        self.ensure_history(symbol, days).await?;
        Ok(self.bars.recent_bars(symbol, days).await?)
    }

    /// # Summary
    /// 推导个股即时概览。
    ///
    /// # Logic
    /// 1. 无任何行情时先合成单根日线（与历史接口共用互斥闸）。
    /// 2. 与前一交易日收盘价比较得到涨跌额/涨跌幅，无前日或前收为 0 时均为 0。
    /// 3. 在最近 365 天窗口内求高低点，空窗口回退到最新单根。
    async fn stock_info(&self, symbol: &str) -> Result<StockInfo, MarketError> {
        let company = self.require_company(symbol).await?;

        self.ensure_history(symbol, 1).await?;
        let latest = self.require_latest_bar(symbol).await?;

        let previous = self.bars.bar_before(symbol, latest.date).await?;
        let (change, change_percent) =
            stats::day_over_day_change(latest.close, previous.map(|bar| bar.close));

        let window_start = self.clock.today() - Duration::days(WEEK_52_WINDOW_DAYS);
        let window = self.bars.bars_since(symbol, window_start).await?;
        let (week_52_high, week_52_low) = stats::window_extrema(&window, &latest);

        Ok(StockInfo {
            symbol: symbol.to_string(),
            current_price: latest.close,
            change,
            change_percent,
            volume: latest.volume,
            market_cap: company.market_cap,
            pe_ratio: company.pe_ratio,
            dividend_yield: company.dividend_yield,
            week_52_high,
            week_52_low,
        })
    }

    /// # Summary
    /// 生成一条次日预测并持久化。
    ///
    /// # Logic
    /// 1. 未知代码 => `CompanyNotFound`；无行情历史 => `InvalidRequest`，
    ///    两种失败路径均不产生任何写入。
    /// 2. 以最新收盘价为基准做 ±8% 有界扰动，置信度独立抽取。
    /// 3. 追加预测记录（唯一的写路径），返回与当前价配对的视图。
    async fn predict(&self, symbol: &str) -> Result<PredictionOutcome, MarketError> {
        self.require_company(symbol).await?;

        let Some(latest) = self.bars.latest_bar(symbol).await? else {
            return Err(MarketError::InvalidRequest(format!(
                "No stock data available for prediction: {}",
                symbol
            )));
        };
        let current_price = latest.close;

        let (predicted_price, confidence) = {
            let mut rng = self.rng.lock().await;
            forecast::next_day_forecast(&mut *rng, current_price)
        };

        let prediction = Prediction {
            symbol: symbol.to_string(),
            predicted_price,
            confidence,
            target_date: self.clock.today() + Duration::days(1),
            created_at: self.clock.now(),
        };
        self.predictions.append_prediction(&prediction).await?;
        debug!(
            "Appended prediction for {}: {} (confidence {})",
            symbol, predicted_price, confidence
        );

        Ok(PredictionOutcome::pair(&prediction, current_price))
    }

    /// # Summary
    /// 读取最近 10 条预测历史，方向标签按读取时刻的最新价重算。
    ///
    /// # Logic
    /// 1. 按创建时间倒序读取预测记录，本操作无任何写入。
    /// 2. 读取当前最新收盘价（无行情时按 0 处理）。
    /// 3. 每条记录即时配对：同一条预测的方向标签会随新行情回溯变化，
    ///    这是既定可观察行为，不得冻结在预测时刻。
    async fn prediction_history(
        &self,
        symbol: &str,
    ) -> Result<Vec<PredictionOutcome>, MarketError> {
        let predictions = self
            .predictions
            .recent_predictions(symbol, PREDICTION_HISTORY_LIMIT)
            .await?;

        let current_price = self
            .bars
            .latest_bar(symbol)
            .await?
            .map_or(0.0, |bar| bar.close);

        Ok(predictions
            .iter()
            .map(|prediction| PredictionOutcome::pair(prediction, current_price))
            .collect())
    }
}
