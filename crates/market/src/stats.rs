use kabuka_core::common::round2;
use kabuka_core::market::entity::DailyBar;

/// # Summary
/// 计算最新收盘价相对前一交易日的涨跌额与涨跌幅百分比。
///
/// # Logic
/// 1. 无前一交易日记录时，涨跌额与涨跌幅均为 0（而非错误）。
/// 2. 前收盘价恰好为 0 时同样按"无前一交易日"处理，规避除零。
/// 3. 否则 `change = latest - previous`，`percent = change / previous × 100`。
///
/// # Arguments
/// * `latest_close` - 最新收盘价。
/// * `previous_close` - 前一交易日收盘价，可能不存在。
///
/// # Returns
/// * `(change, change_percent)`，均保留两位小数。
#[must_use]
pub fn day_over_day_change(latest_close: f64, previous_close: Option<f64>) -> (f64, f64) {
    match previous_close {
        Some(previous) if previous != 0.0 => {
            let change = latest_close - previous;
            (round2(change), round2(change / previous * 100.0))
        }
        _ => (0.0, 0.0),
    }
}

/// # Summary
/// 在给定窗口内求 52 周最高价与最低价。
///
/// # Logic
/// 1. 窗口为空时回退到最新一根日线自身的 high/low（单根窗口语义）。
/// 2. 否则取窗口内 `high` 的最大值与 `low` 的最小值。
///
/// # Arguments
/// * `window` - 位于最近 365 天内的日线集合。
/// * `latest` - 最新一根日线，用作空窗口的回退。
///
/// # Returns
/// * `(week_52_high, week_52_low)`，均保留两位小数。
#[must_use]
pub fn window_extrema(window: &[DailyBar], latest: &DailyBar) -> (f64, f64) {
    if window.is_empty() {
        return (round2(latest.high), round2(latest.low));
    }

    let high = window.iter().map(|bar| bar.high).fold(f64::MIN, f64::max);
    let low = window.iter().map(|bar| bar.low).fold(f64::MAX, f64::min);
    (round2(high), round2(low))
}
