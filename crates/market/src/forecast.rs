use kabuka_core::common::{round2, round3};
use rand::Rng;

// 次日预测扰动区间 ±8%
const FORECAST_CHANGE_LIMIT: f64 = 0.08;
// 置信度抽样区间（纯装饰值，与预测准确性无关）
const CONFIDENCE_MIN: f64 = 0.65;
const CONFIDENCE_MAX: f64 = 0.92;

/// # Summary
/// 基于当前价格生成次日预测价与置信度。
///
/// # Logic
/// 1. 从 [-8%, +8%] 均匀抽取扰动比例，`predicted = current × (1 + 扰动)`。
/// 2. 置信度从 [0.65, 0.92] 均匀抽取，与历史形态、波动率均无关。
///
/// # Invariants
/// - 无条件随机启发式：不依赖任何历史数据，置信度不具统计意义。
/// - 方向标签由调用方即时推导，本函数不产出也不存储方向。
///
/// # Arguments
/// * `rng` - 显式注入的随机源。
/// * `current_price` - 最新收盘价。
///
/// # Returns
/// * `(predicted_price, confidence)`，分别保留两位与三位小数。
pub fn next_day_forecast<R: Rng>(rng: &mut R, current_price: f64) -> (f64, f64) {
    let change_percent = rng.random_range(-FORECAST_CHANGE_LIMIT..=FORECAST_CHANGE_LIMIT);
    let predicted_price = round2(current_price * (1.0 + change_percent));
    let confidence = round3(rng.random_range(CONFIDENCE_MIN..=CONFIDENCE_MAX));
    (predicted_price, confidence)
}
