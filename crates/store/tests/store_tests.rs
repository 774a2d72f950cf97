use chrono::{NaiveDate, TimeZone, Utc};
use kabuka_core::market::entity::{Company, DailyBar, Prediction};
use kabuka_core::store::port::{BarStore, CompanyStore, PredictionStore};
use kabuka_store::dashboard::SqliteDashboardStore;
use tempfile::tempdir;

fn company(symbol: &str, market_cap: f64) -> Company {
    Company {
        symbol: symbol.to_string(),
        name: format!("{} Ltd", symbol),
        sector: "IT".to_string(),
        market_cap,
        pe_ratio: 20.0,
        dividend_yield: 1.0,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
    }
}

fn daily_bar(symbol: &str, date: NaiveDate, close: f64) -> DailyBar {
    DailyBar {
        symbol: symbol.to_string(),
        date,
        open: close,
        high: close * 1.02,
        low: close * 0.98,
        close,
        volume: 1_000_000,
    }
}

// OnceLock 全局根目录只允许设置一次，本二进制内所有场景共用一个集成测试
#[tokio::test]
async fn test_store_full_integration() {
    // 1. 初始化临时测试环境
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    let root_path = tmp_dir.path().to_path_buf();
    kabuka_store::config::set_root_dir(root_path.clone());

    let store = SqliteDashboardStore::new()
        .await
        .expect("Failed to create dashboard store");

    // 验证物理路径 (应当在临时目录下)
    assert!(root_path.join("dashboard.db").exists());

    // 2. 公司存取
    assert!(store.list_companies().await.unwrap().is_empty());

    let seed = vec![company("RELIANCE", 1_500_000.0), company("TCS", 1_200_000.0)];
    store.save_companies(&seed).await.unwrap();

    let listed = store.list_companies().await.unwrap();
    assert_eq!(listed.len(), 2);
    // 按写入顺序返回
    assert_eq!(listed[0].symbol, "RELIANCE");
    assert_eq!(listed[1].symbol, "TCS");

    let fetched = store.get_company("TCS").await.unwrap().expect("TCS should exist");
    assert_eq!(fetched.name, "TCS Ltd");
    assert_eq!(fetched.market_cap, 1_200_000.0);
    assert!(store.get_company("UNKNOWN").await.unwrap().is_none());

    // 重复写入为覆盖语义，不产生重复行
    store.save_companies(&seed).await.unwrap();
    assert_eq!(store.list_companies().await.unwrap().len(), 2);

    // 3. 日线存取
    let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
    assert!(!store.has_bars("RELIANCE").await.unwrap());

    let bars = vec![
        daily_bar("RELIANCE", d(1), 1500.0),
        daily_bar("RELIANCE", d(2), 1520.45),
        daily_bar("RELIANCE", d(3), 1498.2),
    ];
    store.save_bars(&bars).await.unwrap();
    assert!(store.has_bars("RELIANCE").await.unwrap());

    // 日期倒序 + 条数上限
    let recent = store.recent_bars("RELIANCE", 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].date, d(3));
    assert_eq!(recent[1].date, d(2));

    // 最新一根
    let latest = store.latest_bar("RELIANCE").await.unwrap().expect("bar should exist");
    assert_eq!(latest.date, d(3));
    assert_eq!(latest.close, 1498.2);
    assert!(store.latest_bar("TCS").await.unwrap().is_none());

    // 严格早于指定日期的最近一根
    let previous = store.bar_before("RELIANCE", d(3)).await.unwrap().expect("previous bar");
    assert_eq!(previous.date, d(2));
    assert!(store.bar_before("RELIANCE", d(1)).await.unwrap().is_none());

    // 窗口读取: 升序，含起始日
    let window = store.bars_since("RELIANCE", d(2)).await.unwrap();
    assert_eq!(window.len(), 2);
    assert_eq!(window[0].date, d(2));
    assert_eq!(window[1].date, d(3));

    // 同日重复写入被主键吸收
    store.save_bars(&[daily_bar("RELIANCE", d(3), 1501.0)]).await.unwrap();
    assert_eq!(store.recent_bars("RELIANCE", 10).await.unwrap().len(), 3);

    // 4. 预测存取: 只追加，创建时间倒序
    let t = |hour| Utc.with_ymd_and_hms(2026, 3, 3, hour, 0, 0).unwrap();
    for (hour, price) in [(9, 1510.0), (10, 1485.5), (11, 1530.25)] {
        store
            .append_prediction(&Prediction {
                symbol: "RELIANCE".to_string(),
                predicted_price: price,
                confidence: 0.815,
                target_date: d(4),
                created_at: t(hour),
            })
            .await
            .unwrap();
    }

    let recent = store.recent_predictions("RELIANCE", 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].predicted_price, 1530.25);
    assert_eq!(recent[1].predicted_price, 1485.5);

    assert!(store.recent_predictions("TCS", 10).await.unwrap().is_empty());
}
