use crate::feed::error::FeedError;
use crate::store::error::StoreError;
use thiserror::Error;

/// # Summary
/// 股票记录域错误，覆盖实体创建与同步/查询类应用服务。
///
/// # Invariants
/// - 上游错误保留原始类型 (`#[source]`)，只附加操作名或 ticker 上下文。
#[derive(Error, Debug)]
pub enum StockError {
    /// 股票代码为空
    #[error("ticker cannot be empty")]
    InvalidTicker,
    /// 拉取外部评级数据失败
    #[error("error fetching stocks: {source}")]
    Feed {
        #[source]
        source: FeedError,
    },
    /// 保存单条记录失败
    #[error("error saving stock {ticker}: {source}")]
    Save {
        ticker: String,
        #[source]
        source: StoreError,
    },
    /// 其它仓储操作失败
    #[error("error {operation}: {source}")]
    Repository {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
    /// 指定 ticker 不存在
    #[error("stock not found: {0}")]
    NotFound(String),
    /// 调用方取消了操作
    #[error("operation cancelled")]
    Cancelled,
}
