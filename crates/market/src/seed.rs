use chrono::{DateTime, Utc};
use kabuka_core::market::entity::Company;

// 默认公司种子列表 (NSE 口径): (代码, 名称, 板块, 市值, 市盈率, 股息率)
const DEFAULT_COMPANIES: [(&str, &str, &str, f64, f64, f64); 12] = [
    ("RELIANCE", "Reliance Industries Ltd", "Oil & Gas", 1_500_000.0, 25.5, 0.8),
    ("TCS", "Tata Consultancy Services Ltd", "IT", 1_200_000.0, 30.2, 1.2),
    ("HDFC", "HDFC Bank Ltd", "Banking", 800_000.0, 18.7, 1.5),
    ("INFY", "Infosys Ltd", "IT", 700_000.0, 28.9, 1.0),
    ("ICICIBANK", "ICICI Bank Ltd", "Banking", 600_000.0, 16.3, 1.8),
    ("HINDUNILVR", "Hindustan Unilever Ltd", "FMCG", 500_000.0, 45.2, 2.1),
    ("ITC", "ITC Ltd", "FMCG", 450_000.0, 22.8, 3.2),
    ("SBIN", "State Bank of India", "Banking", 400_000.0, 12.5, 2.5),
    ("BHARTIARTL", "Bharti Airtel Ltd", "Telecom", 350_000.0, 35.6, 0.5),
    ("AXISBANK", "Axis Bank Ltd", "Banking", 300_000.0, 15.8, 1.9),
    ("WIPRO", "Wipro Ltd", "IT", 250_000.0, 26.4, 0.9),
    ("HCLTECH", "HCL Technologies Ltd", "IT", 200_000.0, 24.1, 1.1),
];

/// # Summary
/// 构造默认公司种子数据，首次访问公司列表且存储为空时一次性写入。
///
/// # Arguments
/// * `now` - 入库时间戳。
///
/// # Returns
/// * 12 家默认公司的实体列表。
#[must_use]
pub fn default_companies(now: DateTime<Utc>) -> Vec<Company> {
    DEFAULT_COMPANIES
        .iter()
        .map(
            |&(symbol, name, sector, market_cap, pe_ratio, dividend_yield)| Company {
                symbol: symbol.to_string(),
                name: name.to_string(),
                sector: sector.to_string(),
                market_cap,
                pe_ratio,
                dividend_yield,
                created_at: now,
            },
        )
        .collect()
}
