use chrono::{Duration, NaiveDate};
use kabuka_core::common::round2;
use kabuka_core::market::entity::DailyBar;
use rand::Rng;

// 基准价抽样区间 [100, 2000)
const BASE_PRICE_MIN: f64 = 100.0;
const BASE_PRICE_MAX: f64 = 2000.0;
// 单日涨跌幅区间 ±5%
const DAILY_CHANGE_LIMIT: f64 = 0.05;
// 日内最高/最低价相对开盘价的抖动系数
const HIGH_JITTER_MAX: f64 = 1.03;
const LOW_JITTER_MIN: f64 = 0.97;
// 成交量抽样区间
const VOLUME_MIN: i64 = 100_000;
const VOLUME_MAX: i64 = 5_000_000;

/// # Summary
/// 为指定代码合成一段以 `today` 结尾、连续 `days` 个日历日的日线序列。
///
/// # Logic
/// 1. 从 [100, 2000) 均匀抽取基准价。
/// 2. 自最旧一天起逐日执行乘性随机游走：价格 ×(1 + U[-5%, +5%])。
/// 3. 当日 `open = close = 游走价`；`high = open × U[1.00, 1.03]`，
///    `low = open × U[0.97, 1.00]`，两者独立抽取。
/// 4. 成交量从 [100000, 5000000] 均匀抽取整数。
/// 5. 全部价格舍入到两位小数。
///
/// # Invariants
/// - 结构上保证日内 `low <= open <= high`（舍入单调，不破坏次序）。
/// - 不保证 `close` 相对 `high`/`low` 的约束，也不做跨日一致性约束。
/// - 纯函数：除注入的随机源外无任何副作用，结果由 `rng` 与 `today` 完全决定。
///
/// # Arguments
/// * `rng` - 显式注入的随机源，固定种子即可复现序列。
/// * `symbol` - 股票代码。
/// * `today` - 序列最后一天（最新一天）的日期。
/// * `days` - 序列长度，契约要求 >= 1（0 返回空序列，由调用方校验拦截）。
///
/// # Returns
/// * 日期升序的日线序列，恰好 `days` 条。
pub fn generate_series<R: Rng>(
    rng: &mut R,
    symbol: &str,
    today: NaiveDate,
    days: u32,
) -> Vec<DailyBar> {
    let mut price = rng.random_range(BASE_PRICE_MIN..BASE_PRICE_MAX);
    let mut series = Vec::with_capacity(days.try_into().unwrap_or_default());

    for offset in (0..days).rev() {
        let date = today - Duration::days(i64::from(offset));

        let daily_change = rng.random_range(-DAILY_CHANGE_LIMIT..=DAILY_CHANGE_LIMIT);
        price *= 1.0 + daily_change;

        let open = price;
        let high = open * rng.random_range(1.0..=HIGH_JITTER_MAX);
        let low = open * rng.random_range(LOW_JITTER_MIN..=1.0);
        let close = price;
        let volume = rng.random_range(VOLUME_MIN..=VOLUME_MAX);

        series.push(DailyBar {
            symbol: symbol.to_string(),
            date,
            open: round2(open),
            high: round2(high),
            low: round2(low),
            close: round2(close),
            volume,
        });
    }

    series
}
