use async_trait::async_trait;
use stockpick_core::event::error::EventError;
use stockpick_core::event::port::EventHandler;
use stockpick_core::stock::event::StockAnalyzedEvent;
use tracing::info;

/// # Summary
/// 把分析完成事件序列化为 JSON 并写入日志的订阅者。
pub struct LoggingEventHandler;

#[async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle(&self, event: &StockAnalyzedEvent) -> Result<(), EventError> {
        let payload =
            serde_json::to_string(event).map_err(|e| EventError::Serialization(e.to_string()))?;
        info!(
            event_id = %event.id,
            stock_id = %event.stock_id,
            score = event.score,
            payload = %payload,
            "Stock analyzed"
        );
        Ok(())
    }
}
