use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use stockpick_core::event::error::EventError;
use stockpick_core::event::port::{EventHandler, EventPublisher};
use stockpick_core::stock::event::StockAnalyzedEvent;
use tracing::{debug, warn};

/// # Summary
/// 进程内事件总线，按主题维护订阅者列表。
///
/// # Invariants
/// - 同一主题的订阅者按订阅顺序依次调用。
/// - 某个订阅者失败后不再调用其后的订阅者，错误原样包装为 `EventError::Handler` 返回。
/// - 发布时先复制订阅者列表，调用订阅者期间不持有 map 的锁。
#[derive(Default)]
pub struct InMemoryEventBus {
    handlers: DashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为主题追加一个订阅者
    pub fn subscribe(&self, topic: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let topic = topic.into();
        debug!(topic = %topic, "Event handler subscribed");
        self.handlers.entry(topic).or_default().push(handler);
    }

    /// 主题当前的订阅者数量
    pub fn handler_count(&self, topic: &str) -> usize {
        self.handlers.get(topic).map_or(0, |h| h.len())
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    /// # Summary
    /// 把事件依次交给主题下的全部订阅者。
    ///
    /// # Logic
    /// 1. 复制主题的订阅者列表，无订阅者时直接返回成功。
    /// 2. 按顺序调用，遇到第一个失败立即返回。
    async fn publish(&self, topic: &str, event: &StockAnalyzedEvent) -> Result<(), EventError> {
        let handlers = match self.handlers.get(topic) {
            Some(entry) => entry.value().clone(),
            None => {
                debug!(topic, event_id = %event.id, "No handlers for topic");
                return Ok(());
            }
        };

        for handler in handlers {
            if let Err(e) = handler.handle(event).await {
                warn!(topic, event_id = %event.id, error = %e, "Event handler failed");
                return Err(match e {
                    EventError::Handler { .. } => e,
                    other => EventError::Handler {
                        topic: topic.to_string(),
                        message: other.to_string(),
                    },
                });
            }
        }
        Ok(())
    }
}
