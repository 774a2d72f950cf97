pub mod time;

/// # Summary
/// 将价格统一舍入到两位小数。
///
/// # Logic
/// 1. 放大 100 倍后四舍五入，再缩回原量级。
///
/// # Arguments
/// * `value` - 待舍入的原始数值。
///
/// # Returns
/// * 保留两位小数的数值。
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// # Summary
/// 将置信度统一舍入到三位小数。
///
/// # Logic
/// 1. 放大 1000 倍后四舍五入，再缩回原量级。
///
/// # Arguments
/// * `value` - 待舍入的原始数值。
///
/// # Returns
/// * 保留三位小数的数值。
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
