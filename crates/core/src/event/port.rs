use crate::event::error::EventError;
use crate::stock::event::StockAnalyzedEvent;
use async_trait::async_trait;

/// # Summary
/// 领域事件发布接口。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 发布失败只影响单个事件，是否中断批处理由调用方决定。
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// # Summary
    /// 向指定主题发布一条分析完成事件。
    ///
    /// # Arguments
    /// * `topic` - 主题名，例如 `stock.analyzed`。
    /// * `event` - 事件负载。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`，任一订阅者失败返回 `Err(EventError)`。
    async fn publish(&self, topic: &str, event: &StockAnalyzedEvent) -> Result<(), EventError>;
}

/// # Summary
/// 事件订阅者接口，由事件总线按订阅顺序调用。
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 处理一条分析完成事件，失败时返回 `EventError`。
    async fn handle(&self, event: &StockAnalyzedEvent) -> Result<(), EventError>;
}
