use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use stockpick_core::common::Money;
use stockpick_core::stock::entity::{Rating, RatingChange, StockRecord, TargetPrice};
use stockpick_core::stock::port::StockRepository;
use stockpick_core::store::error::StoreError;
use tracing::debug;
use uuid::Uuid;

/// 默认评级数据库文件名
const DEFAULT_STOCK_DB: &str = "stocks.db";

/// 查询列顺序与 `StockRow` 一一对应
const SELECT_COLUMNS: &str = "SELECT id, ticker, target_from, target_from_currency, target_to, \
     target_to_currency, company, action, brokerage, rating_from, rating_to, observed_at FROM stocks";

type StockRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    DateTime<Utc>,
);

/// StockRepository 的 SQLite 实现。
///
/// # Summary
/// 在 `stocks.db` 中以 ticker 为唯一键保存评级记录。
///
/// # Invariants
/// * 表结构在存储实例创建时初始化。
/// * 金额以十进制文本保存，读回时不丢失精度。
/// * 覆盖写入保留首次插入时的 `id`。
pub struct SqliteStockRepository {
    pool: SqlitePool,
}

impl SqliteStockRepository {
    /// 在数据根目录下创建或打开 `stocks.db`。
    ///
    /// # Logic
    /// 1. 获取配置的数据根目录并确保其存在。
    /// 2. 打开数据库文件并初始化表结构。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或数据库错误。
    pub async fn new() -> Result<Self, StoreError> {
        let root = crate::config::get_root_dir();
        fs::create_dir_all(&root).map_err(|e| StoreError::InitError(e.to_string()))?;
        Self::open(root.join(DEFAULT_STOCK_DB)).await
    }

    /// 打开指定路径的数据库文件，不存在时自动创建。
    ///
    /// # Arguments
    /// * `db_path` - 数据库文件路径。
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(db_path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS stocks (
                id TEXT PRIMARY KEY,
                ticker TEXT NOT NULL UNIQUE,
                target_from TEXT NOT NULL,
                target_from_currency TEXT NOT NULL,
                target_to TEXT NOT NULL,
                target_to_currency TEXT NOT NULL,
                company TEXT NOT NULL,
                action TEXT NOT NULL,
                brokerage TEXT NOT NULL,
                rating_from TEXT NOT NULL,
                rating_to TEXT NOT NULL,
                observed_at DATETIME NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_stocks_observed_at ON stocks (observed_at);
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        debug!(path = %db_path.as_ref().display(), "Stock database ready");
        Ok(Self { pool })
    }
}

fn decode_amount(column: &str, text: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(text).map_err(|e| StoreError::Decode(format!("{column} '{text}': {e}")))
}

/// 把数据库行还原为实体，金额或 ID 损坏时返回 `StoreError::Decode`。
fn decode_row(row: StockRow) -> Result<StockRecord, StoreError> {
    let (
        id,
        ticker,
        target_from,
        target_from_currency,
        target_to,
        target_to_currency,
        company,
        action,
        brokerage,
        rating_from,
        rating_to,
        observed_at,
    ) = row;

    let id = Uuid::parse_str(&id).map_err(|e| StoreError::Decode(format!("id '{id}': {e}")))?;

    Ok(StockRecord {
        id,
        ticker,
        target: TargetPrice {
            from: Money::new(decode_amount("target_from", &target_from)?, target_from_currency),
            to: Money::new(decode_amount("target_to", &target_to)?, target_to_currency),
        },
        company,
        action,
        brokerage,
        rating: RatingChange {
            from: Rating::from(rating_from),
            to: Rating::from(rating_to),
        },
        observed_at,
    })
}

#[async_trait]
impl StockRepository for SqliteStockRepository {
    /// # Summary
    /// 按 ticker 保存或覆盖评级记录。
    ///
    /// # Logic
    /// 使用 `ON CONFLICT(ticker) DO UPDATE` 覆盖除 `id` 外的全部列。
    async fn save(&self, stock: &StockRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO stocks (
                id, ticker, target_from, target_from_currency, target_to, target_to_currency,
                company, action, brokerage, rating_from, rating_to, observed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(ticker) DO UPDATE SET
                target_from = excluded.target_from,
                target_from_currency = excluded.target_from_currency,
                target_to = excluded.target_to,
                target_to_currency = excluded.target_to_currency,
                company = excluded.company,
                action = excluded.action,
                brokerage = excluded.brokerage,
                rating_from = excluded.rating_from,
                rating_to = excluded.rating_to,
                observed_at = excluded.observed_at
            "#,
        )
        .bind(stock.id.to_string())
        .bind(&stock.ticker)
        .bind(stock.target.from.amount.to_string())
        .bind(&stock.target.from.currency)
        .bind(stock.target.to.amount.to_string())
        .bind(&stock.target.to.currency)
        .bind(&stock.company)
        .bind(&stock.action)
        .bind(&stock.brokerage)
        .bind(stock.rating.from.as_str())
        .bind(stock.rating.to.as_str())
        .bind(stock.observed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<StockRecord>, StoreError> {
        sqlx::query_as::<_, StockRow>(&format!("{SELECT_COLUMNS} WHERE ticker = ?"))
            .bind(ticker)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(decode_row)
            .transpose()
    }

    /// # Summary
    /// 读取全部记录，按评级发布时间倒序。
    async fn find_all(&self) -> Result<Vec<StockRecord>, StoreError> {
        let rows = sqlx::query_as::<_, StockRow>(&format!("{SELECT_COLUMNS} ORDER BY observed_at DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(decode_row).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM stocks WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
