use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use kabuka_core::market::entity::{Company, DailyBar, Prediction};
use kabuka_core::store::error::StoreError;
use kabuka_core::store::port::{BarStore, CompanyStore, PredictionStore};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::fs;

/// 默认看板数据库文件名
const DEFAULT_DASHBOARD_DB: &str = "dashboard.db";

/// 三大存储端口的 SQLite 实现。
///
/// # Summary
/// 在中心化的 SQLite 数据库 (`dashboard.db`) 中管理公司参考数据、
/// 合成日线行情与预测历史，三张表共享同一个连接池。
///
/// # Invariants
/// * 数据库结构在存储实例创建时初始化。
/// * `daily_bars` 以 `(symbol, date)` 为主键，天然排除同日重复行。
/// * `predictions` 只追加，读取按创建时间倒序。
pub struct SqliteDashboardStore {
    pool: SqlitePool,
}

impl SqliteDashboardStore {
    /// 创建新的 SqliteDashboardStore 并初始化表结构。
    ///
    /// # Logic
    /// 1. 获取配置的数据根目录并确保其存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 连接到数据库并执行 DDL 初始化三张表。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或数据库错误。
    pub async fn new() -> Result<Self, StoreError> {
        let root = crate::config::get_root_dir();
        fs::create_dir_all(&root).map_err(|e| StoreError::InitError(e.to_string()))?;

        let db_path = root.join(DEFAULT_DASHBOARD_DB);

        // 使用官方推荐的配置方式，确保自动创建数据库文件
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        // 初始化看板表结构
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                symbol TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                sector TEXT NOT NULL,
                market_cap REAL NOT NULL,
                pe_ratio REAL NOT NULL,
                dividend_yield REAL NOT NULL,
                created_at DATETIME NOT NULL
            );

            CREATE TABLE IF NOT EXISTS daily_bars (
                symbol TEXT NOT NULL,
                date DATE NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                volume INTEGER NOT NULL,
                PRIMARY KEY (symbol, date)
            );

            CREATE TABLE IF NOT EXISTS predictions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL,
                predicted_price REAL NOT NULL,
                confidence REAL NOT NULL,
                target_date DATE NOT NULL,
                created_at DATETIME NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_predictions_symbol_created
                ON predictions (symbol, created_at DESC);
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        Ok(Self { pool })
    }
}

type CompanyRow = (String, String, String, f64, f64, f64, DateTime<Utc>);
type BarRow = (String, NaiveDate, f64, f64, f64, f64, i64);
type PredictionRow = (String, f64, f64, NaiveDate, DateTime<Utc>);

fn company_from_row(row: CompanyRow) -> Company {
    Company {
        symbol: row.0,
        name: row.1,
        sector: row.2,
        market_cap: row.3,
        pe_ratio: row.4,
        dividend_yield: row.5,
        created_at: row.6,
    }
}

fn bar_from_row(row: BarRow) -> DailyBar {
    DailyBar {
        symbol: row.0,
        date: row.1,
        open: row.2,
        high: row.3,
        low: row.4,
        close: row.5,
        volume: row.6,
    }
}

fn prediction_from_row(row: PredictionRow) -> Prediction {
    Prediction {
        symbol: row.0,
        predicted_price: row.1,
        confidence: row.2,
        target_date: row.3,
        created_at: row.4,
    }
}

#[async_trait]
impl CompanyStore for SqliteDashboardStore {
    /// # Summary
    /// 按入库先后列出全部公司。
    ///
    /// # Logic
    /// 查询 `companies` 表，按 rowid 升序（即种子化写入顺序）。
    ///
    /// # Returns
    /// * `Result<Vec<Company>, StoreError>`
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT symbol, name, sector, market_cap, pe_ratio, dividend_yield, created_at
            FROM companies
            ORDER BY rowid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(company_from_row).collect())
    }

    /// # Summary
    /// 按代码查询公司。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    ///
    /// # Returns
    /// * `Result<Option<Company>, StoreError>` - 匹配的公司或 None。
    async fn get_company(&self, symbol: &str) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT symbol, name, sector, market_cap, pe_ratio, dividend_yield, created_at
            FROM companies
            WHERE symbol = ?
            "#,
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(company_from_row))
    }

    /// # Summary
    /// 批量写入公司（种子化专用）。
    ///
    /// # Logic
    /// 在 `companies` 表上逐条执行 `INSERT OR REPLACE`。
    ///
    /// # Arguments
    /// * `companies` - 待写入的公司列表。
    ///
    /// # Returns
    /// * `Result<(), StoreError>`
    async fn save_companies(&self, companies: &[Company]) -> Result<(), StoreError> {
        for company in companies {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO companies
                    (symbol, name, sector, market_cap, pe_ratio, dividend_yield, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&company.symbol)
            .bind(&company.name)
            .bind(&company.sector)
            .bind(company.market_cap)
            .bind(company.pe_ratio)
            .bind(company.dividend_yield)
            .bind(company.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl BarStore for SqliteDashboardStore {
    /// # Summary
    /// 批量保存日线数据。
    ///
    /// # Logic
    /// 在 `daily_bars` 表上逐条执行 `INSERT OR REPLACE`，
    /// 主键 `(symbol, date)` 保证同日不产生重复行。
    ///
    /// # Arguments
    /// * `bars` - 待保存的日线列表。
    ///
    /// # Returns
    /// * `Result<(), StoreError>`
    async fn save_bars(&self, bars: &[DailyBar]) -> Result<(), StoreError> {
        for bar in bars {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO daily_bars
                    (symbol, date, open, high, low, close, volume)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&bar.symbol)
            .bind(bar.date)
            .bind(bar.open)
            .bind(bar.high)
            .bind(bar.low)
            .bind(bar.close)
            .bind(bar.volume)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// # Summary
    /// 判断某代码是否已有日线记录。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    ///
    /// # Returns
    /// * `Result<bool, StoreError>`
    async fn has_bars(&self, symbol: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM daily_bars WHERE symbol = ?)",
        )
        .bind(symbol)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(exists != 0)
    }

    /// # Summary
    /// 按日期倒序读取某代码最近的日线。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    /// * `limit` - 返回条数上限。
    ///
    /// # Returns
    /// * `Result<Vec<DailyBar>, StoreError>` - 日期倒序。
    async fn recent_bars(&self, symbol: &str, limit: u32) -> Result<Vec<DailyBar>, StoreError> {
        let rows = sqlx::query_as::<_, BarRow>(
            r#"
            SELECT symbol, date, open, high, low, close, volume
            FROM daily_bars
            WHERE symbol = ?
            ORDER BY date DESC
            LIMIT ?
            "#,
        )
        .bind(symbol)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(bar_from_row).collect())
    }

    /// # Summary
    /// 读取某代码日期最新的一根日线。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    ///
    /// # Returns
    /// * `Result<Option<DailyBar>, StoreError>`
    async fn latest_bar(&self, symbol: &str) -> Result<Option<DailyBar>, StoreError> {
        let row = sqlx::query_as::<_, BarRow>(
            r#"
            SELECT symbol, date, open, high, low, close, volume
            FROM daily_bars
            WHERE symbol = ?
            ORDER BY date DESC
            LIMIT 1
            "#,
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(bar_from_row))
    }

    /// # Summary
    /// 读取严格早于指定日期的最近一根日线。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    /// * `date` - 比较基准日（不含）。
    ///
    /// # Returns
    /// * `Result<Option<DailyBar>, StoreError>`
    async fn bar_before(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyBar>, StoreError> {
        let row = sqlx::query_as::<_, BarRow>(
            r#"
            SELECT symbol, date, open, high, low, close, volume
            FROM daily_bars
            WHERE symbol = ? AND date < ?
            ORDER BY date DESC
            LIMIT 1
            "#,
        )
        .bind(symbol)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(bar_from_row))
    }

    /// # Summary
    /// 按日期升序读取某日期（含）之后的全部日线。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    /// * `since` - 窗口起始日（含）。
    ///
    /// # Returns
    /// * `Result<Vec<DailyBar>, StoreError>` - 日期升序。
    async fn bars_since(
        &self,
        symbol: &str,
        since: NaiveDate,
    ) -> Result<Vec<DailyBar>, StoreError> {
        let rows = sqlx::query_as::<_, BarRow>(
            r#"
            SELECT symbol, date, open, high, low, close, volume
            FROM daily_bars
            WHERE symbol = ? AND date >= ?
            ORDER BY date ASC
            "#,
        )
        .bind(symbol)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(bar_from_row).collect())
    }
}

#[async_trait]
impl PredictionStore for SqliteDashboardStore {
    /// # Summary
    /// 追加一条预测记录。
    ///
    /// # Logic
    /// 在 `predictions` 表上执行 `INSERT`，自增 id 保留完整追加历史。
    ///
    /// # Arguments
    /// * `prediction` - 待追加的预测实体。
    ///
    /// # Returns
    /// * `Result<(), StoreError>`
    async fn append_prediction(&self, prediction: &Prediction) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO predictions
                (symbol, predicted_price, confidence, target_date, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&prediction.symbol)
        .bind(prediction.predicted_price)
        .bind(prediction.confidence)
        .bind(prediction.target_date)
        .bind(prediction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// # Summary
    /// 按创建时间倒序读取某代码最近的预测记录。
    ///
    /// # Logic
    /// 创建时间相同（例如测试中使用虚拟时钟）时以自增 id 倒序打破平局，
    /// 保证"最新在前"的确定性。
    ///
    /// # Arguments
    /// * `symbol` - 股票代码。
    /// * `limit` - 返回条数上限。
    ///
    /// # Returns
    /// * `Result<Vec<Prediction>, StoreError>` - 创建时间倒序。
    async fn recent_predictions(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<Prediction>, StoreError> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT symbol, predicted_price, confidence, target_date, created_at
            FROM predictions
            WHERE symbol = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(symbol)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(prediction_from_row).collect())
    }
}
