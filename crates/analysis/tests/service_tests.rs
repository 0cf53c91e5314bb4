use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stockpick_analysis::cancel;
use stockpick_analysis::pipeline::AnalysisPipeline;
use stockpick_analysis::score::InvestmentScorer;
use stockpick_analysis::service::AnalysisService;
use stockpick_analysis::stock_service::StockService;
use stockpick_core::analysis::error::AnalysisError;
use stockpick_core::common::Money;
use stockpick_core::common::time::FakeClockProvider;
use stockpick_core::event::error::EventError;
use stockpick_core::event::port::EventPublisher;
use stockpick_core::feed::error::FeedError;
use stockpick_core::stock::entity::{Rating, RatingChange, StockRecord, TargetPrice};
use stockpick_core::stock::error::StockError;
use stockpick_core::stock::event::{STOCK_ANALYZED_TOPIC, StockAnalyzedEvent};
use stockpick_core::stock::port::{StockFeed, StockRepository};
use stockpick_core::store::error::StoreError;
use tokio::sync::Mutex;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 15, 30, 0).unwrap()
}

fn record(ticker: &str, from: Decimal, to: Decimal, rating_from: &str, rating_to: &str, age: Duration) -> StockRecord {
    StockRecord::new(
        ticker,
        TargetPrice {
            from: Money::usd(from),
            to: Money::usd(to),
        },
        RatingChange {
            from: Rating::from(rating_from),
            to: Rating::from(rating_to),
        },
        now() - age,
    )
    .unwrap()
    .with_company(format!("{ticker} Inc."))
    .with_action("target raised by")
    .with_brokerage("Morgan Stanley")
}

/// 以 ticker 为键的内存仓储，可模拟读写失败
#[derive(Default)]
struct MockRepository {
    stocks: Mutex<HashMap<String, StockRecord>>,
    fail_reads: bool,
    fail_save_for: Option<String>,
}

impl MockRepository {
    fn with(stocks: Vec<StockRecord>) -> Self {
        Self {
            stocks: Mutex::new(stocks.into_iter().map(|s| (s.ticker.clone(), s)).collect()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl StockRepository for MockRepository {
    async fn save(&self, stock: &StockRecord) -> Result<(), StoreError> {
        if self.fail_save_for.as_deref() == Some(stock.ticker.as_str()) {
            return Err(StoreError::Database("disk full".into()));
        }
        self.stocks.lock().await.insert(stock.ticker.clone(), stock.clone());
        Ok(())
    }

    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<StockRecord>, StoreError> {
        Ok(self.stocks.lock().await.get(ticker).cloned())
    }

    async fn find_all(&self) -> Result<Vec<StockRecord>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Database("connection refused".into()));
        }
        Ok(self.stocks.lock().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.stocks.lock().await.retain(|_, s| s.id != id);
        Ok(())
    }
}

struct MockFeed {
    result: std::sync::Mutex<Option<Result<Vec<StockRecord>, FeedError>>>,
}

impl MockFeed {
    fn returning(result: Result<Vec<StockRecord>, FeedError>) -> Self {
        Self {
            result: std::sync::Mutex::new(Some(result)),
        }
    }
}

#[async_trait]
impl StockFeed for MockFeed {
    async fn fetch_stocks(&self) -> Result<Vec<StockRecord>, FeedError> {
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// 记录所有事件，并让指定次数的发布失败
#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<(String, StockAnalyzedEvent)>>,
    failures_left: AtomicUsize,
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, event: &StockAnalyzedEvent) -> Result<(), EventError> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(EventError::Handler {
                topic: topic.to_string(),
                message: "subscriber offline".into(),
            });
        }
        self.events.lock().await.push((topic.to_string(), event.clone()));
        Ok(())
    }
}

fn analysis_service(repo: Arc<MockRepository>) -> AnalysisService {
    AnalysisService::new(
        repo,
        Arc::new(FakeClockProvider::new(now())),
        AnalysisPipeline::default(),
    )
}

#[tokio::test]
async fn test_analyze_stocks_publishes_one_event_per_analysis() {
    let repo = Arc::new(MockRepository::with(vec![
        record("NVDA", dec!(100), dec!(150), "Hold", "Buy", Duration::hours(2)),
        record("AMD", dec!(80), dec!(88), "Neutral", "Neutral", Duration::hours(5)),
        record("FLAT", dec!(50), dec!(50), "Hold", "Buy", Duration::hours(1)),
        record("OLD", dec!(50), dec!(75), "Hold", "Buy", Duration::days(3)),
    ]));
    let publisher = Arc::new(RecordingPublisher::default());
    let service = analysis_service(repo).with_publisher(publisher.clone());

    let run = service.analyze_stocks(cancel::never()).await.unwrap();
    let tickers: Vec<_> = run.analyses.iter().map(|a| a.stock.ticker.as_str()).collect();
    assert_eq!(tickers, ["NVDA", "AMD"]);
    assert_eq!(run.undelivered_events, 0);

    let events = publisher.events.lock().await;
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|(topic, _)| topic == STOCK_ANALYZED_TOPIC));
    assert_eq!(events[0].1.stock_id, run.analyses[0].stock.id);
    assert_eq!(events[0].1.score, run.analyses[0].score);
    assert_eq!(events[0].1.indicators, run.analyses[0].indicators);
}

#[tokio::test]
async fn test_publish_failures_are_counted_not_propagated() {
    let repo = Arc::new(MockRepository::with(vec![
        record("NVDA", dec!(100), dec!(150), "Hold", "Buy", Duration::hours(2)),
        record("AMD", dec!(80), dec!(88), "Neutral", "Neutral", Duration::hours(5)),
    ]));
    let publisher = Arc::new(RecordingPublisher {
        failures_left: AtomicUsize::new(1),
        ..Default::default()
    });
    let service = analysis_service(repo).with_publisher(publisher.clone());

    let run = service.analyze_stocks(cancel::never()).await.unwrap();
    assert_eq!(run.analyses.len(), 2);
    assert_eq!(run.undelivered_events, 1);
    assert_eq!(publisher.events.lock().await.len(), 1);
}

#[tokio::test]
async fn test_empty_repository_is_not_possible() {
    let service = analysis_service(Arc::new(MockRepository::default()));
    let result = service.analyze_stocks(cancel::never()).await;
    assert!(matches!(result, Err(AnalysisError::AnalysisNotPossible(_))));
}

#[tokio::test]
async fn test_all_stale_repository_is_stale_data() {
    let repo = Arc::new(MockRepository::with(vec![
        record("OLD1", dec!(100), dec!(150), "Hold", "Buy", Duration::hours(25)),
        record("OLD2", dec!(100), dec!(150), "Hold", "Buy", Duration::days(10)),
    ]));
    let result = analysis_service(repo).analyze_stocks(cancel::never()).await;
    assert!(matches!(result, Err(AnalysisError::StaleData)));
}

#[tokio::test]
async fn test_repository_failure_is_propagated_with_context() {
    let repo = Arc::new(MockRepository {
        fail_reads: true,
        ..Default::default()
    });
    let result = analysis_service(repo).analyze_stocks(cancel::never()).await;
    match result {
        Err(AnalysisError::Repository { operation, source }) => {
            assert_eq!(operation, "fetching stocks for analysis");
            assert!(matches!(source, StoreError::Database(_)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let repo = Arc::new(MockRepository::with(vec![record(
        "NVDA",
        dec!(100),
        dec!(150),
        "Hold",
        "Buy",
        Duration::hours(2),
    )]));
    let (tx, rx) = cancel::channel();
    tx.send(true).unwrap();

    let result = analysis_service(repo).analyze_stocks(rx).await;
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[tokio::test]
async fn test_advancing_clock_makes_batch_stale() {
    let repo = Arc::new(MockRepository::with(vec![record(
        "NVDA",
        dec!(100),
        dec!(150),
        "Hold",
        "Buy",
        Duration::hours(2),
    )]));
    let clock = Arc::new(FakeClockProvider::new(now()));
    let service = AnalysisService::new(repo, clock.clone(), AnalysisPipeline::default());

    assert!(service.analyze_stocks(cancel::never()).await.is_ok());
    clock.advance(Duration::hours(23));
    assert!(matches!(
        service.analyze_stocks(cancel::never()).await,
        Err(AnalysisError::StaleData)
    ));
}

fn stock_service(repo: Arc<MockRepository>, feed: MockFeed) -> StockService {
    StockService::new(
        repo,
        Arc::new(feed),
        InvestmentScorer::standard(),
        Arc::new(FakeClockProvider::new(now())),
    )
}

#[tokio::test]
async fn test_sync_upserts_by_ticker() {
    let existing = record("AAPL", dec!(150), dec!(160), "Hold", "Buy", Duration::days(5));
    let repo = Arc::new(MockRepository::with(vec![existing]));
    let feed = MockFeed::returning(Ok(vec![
        record("AAPL", dec!(160), dec!(190), "Buy", "Outperform", Duration::hours(1)),
        record("TSLA", dec!(200), dec!(250), "Hold", "Buy", Duration::hours(1)),
    ]));
    let service = stock_service(repo.clone(), feed);

    let synced = service.sync_from_feed(cancel::never()).await.unwrap();
    assert_eq!(synced, 2);

    let all = service.all_stocks().await.unwrap();
    assert_eq!(all.len(), 2);
    let aapl = service.stock_by_ticker("AAPL").await.unwrap();
    assert_eq!(aapl.target.to.amount, dec!(190));
}

#[tokio::test]
async fn test_sync_stops_on_first_save_failure() {
    let repo = Arc::new(MockRepository {
        fail_save_for: Some("BAD".into()),
        ..Default::default()
    });
    let feed = MockFeed::returning(Ok(vec![
        record("GOOD", dec!(10), dec!(12), "Hold", "Buy", Duration::hours(1)),
        record("BAD", dec!(10), dec!(12), "Hold", "Buy", Duration::hours(1)),
        record("LATER", dec!(10), dec!(12), "Hold", "Buy", Duration::hours(1)),
    ]));
    let service = stock_service(repo.clone(), feed);

    match service.sync_from_feed(cancel::never()).await {
        Err(StockError::Save { ticker, .. }) => assert_eq!(ticker, "BAD"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(repo.stocks.lock().await.contains_key("GOOD"));
    assert!(!repo.stocks.lock().await.contains_key("LATER"));
}

#[tokio::test]
async fn test_sync_wraps_feed_errors() {
    let feed = MockFeed::returning(Err(FeedError::Network("HTTP 503".into())));
    let service = stock_service(Arc::new(MockRepository::default()), feed);
    let result = service.sync_from_feed(cancel::never()).await;
    assert!(matches!(result, Err(StockError::Feed { .. })));
}

#[tokio::test]
async fn test_recommended_includes_records_analysis_would_exclude() {
    let repo = Arc::new(MockRepository::with(vec![
        record("OLD", dec!(100), dec!(300), "Hold", "Buy", Duration::days(40)),
        record("FLAT", dec!(100), dec!(100), "Hold", "Buy", Duration::hours(1)),
        record("JUMP", dec!(100), dec!(120), "Sell", "Strong-Buy", Duration::hours(1)),
    ]));
    let service = stock_service(repo, MockFeed::returning(Ok(Vec::new())));

    let ranked = service.recommended_stocks().await.unwrap();
    assert_eq!(ranked.len(), 3);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_stock_by_ticker_not_found() {
    let service = stock_service(
        Arc::new(MockRepository::default()),
        MockFeed::returning(Ok(Vec::new())),
    );
    let result = service.stock_by_ticker("NOPE").await;
    assert!(matches!(result, Err(StockError::NotFound(t)) if t == "NOPE"));
}
