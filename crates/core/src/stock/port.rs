use crate::feed::error::FeedError;
use crate::stock::entity::StockRecord;
use crate::store::error::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

/// # Summary
/// 评级记录仓储接口，负责 `StockRecord` 的持久化与读取。
///
/// # Invariants
/// - 同一 ticker 最多保存一条记录，`save` 对已存在的 ticker 执行覆盖。
/// - `find_all` 返回完整快照，顺序不作保证，分析流程会自行排序。
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// # Summary
    /// 保存或更新评级记录。
    ///
    /// # Logic
    /// 1. 按 ticker 查找既有记录。
    /// 2. 存在则覆盖除 `id` 外的全部字段，否则插入新行。
    ///
    /// # Arguments
    /// * `stock`: 待保存的记录。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    async fn save(&self, stock: &StockRecord) -> Result<(), StoreError>;

    /// # Summary
    /// 按股票代码查找记录。
    ///
    /// # Arguments
    /// * `ticker`: 股票代码。
    ///
    /// # Returns
    /// 存在返回 `Some(StockRecord)`，否则返回 `None`。
    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<StockRecord>, StoreError>;

    /// # Summary
    /// 读取全部评级记录。
    ///
    /// # Returns
    /// 记录列表或 `StoreError`。
    async fn find_all(&self) -> Result<Vec<StockRecord>, StoreError>;

    /// 按 ID 删除记录，分析流程从不调用。
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// # Summary
/// 外部评级数据源接口。
///
/// # Invariants
/// - 分页对调用方透明，返回的是完整物化后的记录序列。
#[async_trait]
pub trait StockFeed: Send + Sync {
    /// # Summary
    /// 拉取外部接口中的全部评级记录。
    ///
    /// # Logic
    /// 1. 逐页请求，直到响应中不再携带下一页游标。
    /// 2. 把每条原始数据转换为 `StockRecord`。
    ///
    /// # Returns
    /// 成功返回记录列表，失败返回 `FeedError`。
    async fn fetch_stocks(&self) -> Result<Vec<StockRecord>, FeedError>;
}
