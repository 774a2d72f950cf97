use chrono::{Duration, NaiveDate};
use kabuka_core::market::entity::DailyBar;
use kabuka_market::{forecast, generator, stats};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

// 校验数值恰好保留两位小数
fn is_round2(value: f64) -> bool {
    ((value * 100.0).round() - value * 100.0).abs() < 1e-6
}

#[test]
fn test_series_shape_and_dates() {
    let mut rng = StdRng::seed_from_u64(42);
    let today = fixed_today();
    let series = generator::generate_series(&mut rng, "RELIANCE", today, 30);

    // 恰好 N 条，以 today 结尾，日期升序且逐日连续
    assert_eq!(series.len(), 30);
    assert_eq!(series[29].date, today);
    assert_eq!(series[0].date, today - Duration::days(29));
    for pair in series.windows(2) {
        assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
    }
}

#[test]
fn test_series_structural_guarantees() {
    let mut rng = StdRng::seed_from_u64(7);
    let series = generator::generate_series(&mut rng, "TCS", fixed_today(), 365);

    for bar in &series {
        // 结构性保证: low <= open <= high，且 open == close
        assert!(bar.low <= bar.open, "low > open: {:?}", bar);
        assert!(bar.open <= bar.high, "open > high: {:?}", bar);
        assert_eq!(bar.open, bar.close);

        // 价格为正且保留两位小数
        assert!(bar.open > 0.0 && bar.high > 0.0 && bar.low > 0.0);
        assert!(is_round2(bar.open) && is_round2(bar.high) && is_round2(bar.low));

        // 成交量位于抽样区间
        assert!((100_000..=5_000_000).contains(&bar.volume));
    }
}

#[test]
fn test_series_daily_step_bounded() {
    let mut rng = StdRng::seed_from_u64(99);
    let series = generator::generate_series(&mut rng, "INFY", fixed_today(), 60);

    // 乘性游走的单日步长有界: 相邻收盘价比值位于 [0.95, 1.05] (含舍入余量)
    for pair in series.windows(2) {
        let ratio = pair[1].close / pair[0].close;
        assert!(ratio > 0.949 && ratio < 1.051, "ratio out of range: {}", ratio);
    }
}

#[test]
fn test_series_reproducible_with_seed() {
    let today = fixed_today();
    let mut rng_a = StdRng::seed_from_u64(1234);
    let mut rng_b = StdRng::seed_from_u64(1234);

    let series_a = generator::generate_series(&mut rng_a, "SBIN", today, 10);
    let series_b = generator::generate_series(&mut rng_b, "SBIN", today, 10);

    for (a, b) in series_a.iter().zip(series_b.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.open, b.open);
        assert_eq!(a.high, b.high);
        assert_eq!(a.low, b.low);
        assert_eq!(a.close, b.close);
        assert_eq!(a.volume, b.volume);
    }
}

#[test]
fn test_day_over_day_change() {
    let (change, percent) = stats::day_over_day_change(105.0, Some(100.0));
    assert_eq!(change, 5.0);
    assert_eq!(percent, 5.0);

    let (change, percent) = stats::day_over_day_change(95.5, Some(100.0));
    assert_eq!(change, -4.5);
    assert_eq!(percent, -4.5);

    // 无前一交易日: 两者均为 0 而非错误
    assert_eq!(stats::day_over_day_change(100.0, None), (0.0, 0.0));

    // 前收盘价为 0: 按无前日处理，规避除零
    assert_eq!(stats::day_over_day_change(100.0, Some(0.0)), (0.0, 0.0));
}

fn bar(date: (i32, u32, u32), high: f64, low: f64) -> DailyBar {
    DailyBar {
        symbol: "RELIANCE".to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
        open: (high + low) / 2.0,
        high,
        low,
        close: (high + low) / 2.0,
        volume: 500_000,
    }
}

#[test]
fn test_window_extrema() {
    let window = vec![
        bar((2026, 2, 27), 110.0, 95.0),
        bar((2026, 2, 28), 132.5, 101.0),
        bar((2026, 3, 1), 120.0, 88.25),
    ];
    let latest = &window[2];

    let (high, low) = stats::window_extrema(&window, latest);
    assert_eq!(high, 132.5);
    assert_eq!(low, 88.25);
}

#[test]
fn test_window_extrema_empty_falls_back_to_latest() {
    let latest = bar((2026, 3, 1), 145.7, 139.3);
    let (high, low) = stats::window_extrema(&[], &latest);
    assert_eq!(high, 145.7);
    assert_eq!(low, 139.3);
}

#[test]
fn test_forecast_bounds_and_rounding() {
    let mut rng = StdRng::seed_from_u64(2026);
    let current_price = 1520.45;

    for _ in 0..200 {
        let (predicted, confidence) = forecast::next_day_forecast(&mut rng, current_price);

        // 预测价位于当前价 ±8% 以内 (含两位小数舍入余量)
        assert!(predicted >= current_price * 0.92 - 0.01);
        assert!(predicted <= current_price * 1.08 + 0.01);
        assert!(is_round2(predicted));

        // 置信度位于 [0.65, 0.92]，保留三位小数
        assert!((0.65..=0.92).contains(&confidence));
        assert!(((confidence * 1000.0).round() - confidence * 1000.0).abs() < 1e-6);
    }
}
