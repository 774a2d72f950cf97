use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use kabuka_core::common::time::FakeClockProvider;
use kabuka_core::market::error::MarketError;
use kabuka_core::market::port::Dashboard;
use kabuka_core::store::port::{BarStore, CompanyStore, PredictionStore};
use kabuka_market::service::DashboardService;
use kabuka_store::dashboard::SqliteDashboardStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

// OnceLock 全局根目录只允许设置一次，本二进制内所有场景共用一个集成测试
#[tokio::test]
async fn test_dashboard_service_full_integration() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    kabuka_store::config::set_root_dir(tmp_dir.path().to_path_buf());

    let store = Arc::new(
        SqliteDashboardStore::new()
            .await
            .expect("Failed to create dashboard store"),
    );
    let companies: Arc<dyn CompanyStore> = store.clone();
    let bars: Arc<dyn BarStore> = store.clone();
    let predictions: Arc<dyn PredictionStore> = store.clone();

    let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let clock = Arc::new(FakeClockProvider::new(now));
    let service = DashboardService::with_clock_and_rng(
        companies,
        bars,
        predictions,
        clock.clone(),
        StdRng::seed_from_u64(42),
    );

    // 1. 首次列出公司触发种子化，共 12 家
    let listed = service.list_companies().await.unwrap();
    assert_eq!(listed.len(), 12);
    assert_eq!(listed[0].symbol, "RELIANCE");

    // 再次列出不会重复种子化
    let listed_again = service.list_companies().await.unwrap();
    assert_eq!(listed_again.len(), 12);

    // 2. 按代码查询
    let company = service.get_company("TCS").await.unwrap();
    assert_eq!(company.name, "Tata Consultancy Services Ltd");
    assert!(matches!(
        service.get_company("UNKNOWN").await,
        Err(MarketError::CompanyNotFound(_))
    ));

    // 3. 历史日线: 首次调用合成 7 天，日期倒序且以"今天"开头
    let today = now.date_naive();
    let first = service.historical("RELIANCE", 7).await.unwrap();
    assert_eq!(first.len(), 7);
    assert_eq!(first[0].date, today);
    assert_eq!(first[6].date, today - Duration::days(6));
    for bar in &first {
        assert!(bar.low <= bar.open && bar.open <= bar.high);
        assert!(bar.close > 0.0);
        assert!((100_000..=5_000_000).contains(&bar.volume));
    }

    // 读取幂等: 第二次调用返回完全相同的行，不重新合成
    let second = service.historical("RELIANCE", 7).await.unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.close, b.close);
        assert_eq!(a.volume, b.volume);
    }

    // days 区间校验
    assert!(matches!(
        service.historical("RELIANCE", 0).await,
        Err(MarketError::InvalidRequest(_))
    ));
    assert!(matches!(
        service.historical("RELIANCE", 366).await,
        Err(MarketError::InvalidRequest(_))
    ));

    // 4. 并发获取未合成代码的历史: 互斥闸保证恰好合成一次
    let service_a = service.clone();
    let service_b = service.clone();
    let (result_a, result_b) = tokio::join!(
        service_a.historical("ITC", 7),
        service_b.historical("ITC", 7)
    );
    let rows_a = result_a.unwrap();
    let rows_b = result_b.unwrap();
    assert_eq!(rows_a.len(), 7);
    assert_eq!(rows_b.len(), 7);
    for (a, b) in rows_a.iter().zip(rows_b.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.close, b.close);
    }
    assert_eq!(store.recent_bars("ITC", 100).await.unwrap().len(), 7);

    // 5. 即时概览: 52 周高低点覆盖最新价，公司指标透传
    let info = service.stock_info("RELIANCE").await.unwrap();
    assert_eq!(info.symbol, "RELIANCE");
    assert!(info.week_52_high >= info.current_price);
    assert!(info.week_52_low <= info.current_price);
    assert_eq!(info.market_cap, 1_500_000.0);
    assert!((100_000..=5_000_000).contains(&info.volume));

    // 概览对无行情代码先合成单根日线，此时涨跌额/涨跌幅均为 0
    let fresh_info = service.stock_info("WIPRO").await.unwrap();
    assert_eq!(fresh_info.change, 0.0);
    assert_eq!(fresh_info.change_percent, 0.0);
    assert_eq!(store.recent_bars("WIPRO", 100).await.unwrap().len(), 1);

    // 6. 预测: 未知代码 404 语义，且不写任何记录
    assert!(matches!(
        service.predict("UNKNOWN").await,
        Err(MarketError::CompanyNotFound(_))
    ));
    assert!(service.prediction_history("UNKNOWN").await.unwrap().is_empty());

    // 已知代码但无行情历史: InvalidRequest，同样不写记录
    assert!(matches!(
        service.predict("INFY").await,
        Err(MarketError::InvalidRequest(_))
    ));
    assert!(service.prediction_history("INFY").await.unwrap().is_empty());

    // 正常预测: 预测价位于最新收盘价 ±8% 以内，记录被持久化
    let latest_close = service.historical("RELIANCE", 1).await.unwrap()[0].close;
    let outcome = service.predict("RELIANCE").await.unwrap();
    assert_eq!(outcome.current_price, latest_close);
    assert!(outcome.predicted_price >= latest_close * 0.92 - 0.01);
    assert!(outcome.predicted_price <= latest_close * 1.08 + 0.01);
    assert!((0.65..=0.92).contains(&outcome.confidence));
    assert_eq!(outcome.target_date, today + Duration::days(1));

    let history = service.prediction_history("RELIANCE").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].predicted_price, outcome.predicted_price);

    // 方向标签即时推导: 与当前价比较
    if outcome.predicted_price > latest_close {
        assert_eq!(outcome.direction.to_string(), "UP");
    } else {
        assert_eq!(outcome.direction.to_string(), "DOWN");
    }

    // 7. 预测历史上限 10 条，创建时间倒序 (最新在前)
    for _ in 0..12 {
        service.predict("RELIANCE").await.unwrap();
    }
    let capped = service.prediction_history("RELIANCE").await.unwrap();
    assert_eq!(capped.len(), 10);

    // 最后一次预测排在首位
    let last = service.predict("RELIANCE").await.unwrap();
    let newest_first = service.prediction_history("RELIANCE").await.unwrap();
    assert_eq!(newest_first[0].predicted_price, last.predicted_price);
    assert_eq!(newest_first[0].confidence, last.confidence);
}
