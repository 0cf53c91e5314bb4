use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use stockpick_bus::handler::LoggingEventHandler;
use stockpick_bus::memory::InMemoryEventBus;
use stockpick_core::analysis::entity::Indicators;
use stockpick_core::event::error::EventError;
use stockpick_core::event::port::{EventHandler, EventPublisher};
use stockpick_core::stock::event::{STOCK_ANALYZED_TOPIC, StockAnalyzedEvent};
use tokio::sync::Mutex;
use uuid::Uuid;

fn event() -> StockAnalyzedEvent {
    StockAnalyzedEvent::new(
        Uuid::new_v4(),
        0.73,
        Indicators {
            price_target_growth: 25.0,
            rating_impact: 0.7,
            broker_confidence: 0.82,
        },
        Utc::now(),
    )
}

/// 把自己的名字记到共享日志里
struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl EventHandler for Recorder {
    async fn handle(&self, _event: &StockAnalyzedEvent) -> Result<(), EventError> {
        self.log.lock().await.push(self.name);
        Ok(())
    }
}

struct Failing;

#[async_trait]
impl EventHandler for Failing {
    async fn handle(&self, _event: &StockAnalyzedEvent) -> Result<(), EventError> {
        Err(EventError::Serialization("boom".into()))
    }
}

#[tokio::test]
async fn test_handlers_run_in_subscription_order() {
    let bus = InMemoryEventBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        bus.subscribe(
            STOCK_ANALYZED_TOPIC,
            Arc::new(Recorder {
                name,
                log: log.clone(),
            }),
        );
    }
    assert_eq!(bus.handler_count(STOCK_ANALYZED_TOPIC), 3);

    bus.publish(STOCK_ANALYZED_TOPIC, &event()).await.unwrap();
    assert_eq!(*log.lock().await, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_first_failure_stops_dispatch() {
    let bus = InMemoryEventBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    bus.subscribe(
        STOCK_ANALYZED_TOPIC,
        Arc::new(Recorder {
            name: "before",
            log: log.clone(),
        }),
    );
    bus.subscribe(STOCK_ANALYZED_TOPIC, Arc::new(Failing));
    bus.subscribe(
        STOCK_ANALYZED_TOPIC,
        Arc::new(Recorder {
            name: "after",
            log: log.clone(),
        }),
    );

    let result = bus.publish(STOCK_ANALYZED_TOPIC, &event()).await;
    match result {
        Err(EventError::Handler { topic, message }) => {
            assert_eq!(topic, STOCK_ANALYZED_TOPIC);
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(*log.lock().await, ["before"]);
}

#[tokio::test]
async fn test_publish_without_subscribers_succeeds() {
    let bus = InMemoryEventBus::new();
    assert_eq!(bus.handler_count("unknown"), 0);
    assert!(bus.publish("unknown", &event()).await.is_ok());
}

#[tokio::test]
async fn test_topics_are_isolated() {
    let bus = InMemoryEventBus::new();
    bus.subscribe("other.topic", Arc::new(Failing));
    bus.subscribe(STOCK_ANALYZED_TOPIC, Arc::new(LoggingEventHandler));

    assert!(bus.publish(STOCK_ANALYZED_TOPIC, &event()).await.is_ok());
    assert!(bus.publish("other.topic", &event()).await.is_err());
}
