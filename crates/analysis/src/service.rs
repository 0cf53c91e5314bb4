use crate::cancel::{self, CancelSignal};
use crate::pipeline::AnalysisPipeline;
use std::sync::Arc;
use std::time::Instant;
use stockpick_core::analysis::entity::StockAnalysis;
use stockpick_core::analysis::error::AnalysisError;
use stockpick_core::common::time::TimeProvider;
use stockpick_core::event::port::EventPublisher;
use stockpick_core::stock::event::{STOCK_ANALYZED_TOPIC, StockAnalyzedEvent};
use stockpick_core::stock::port::StockRepository;
use tracing::{error, info, warn};

/// # Summary
/// 一次分析运行的结果。
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// 按评分降序排列的分析结果
    pub analyses: Vec<StockAnalysis>,
    /// 发布失败的事件数量
    pub undelivered_events: usize,
}

/// # Summary
/// 分析应用服务：从仓储读取全部记录，执行分析流水线，并为每条结果发布事件。
///
/// # Invariants
/// - 仓储、事件发布器与时钟均通过构造函数注入 (`Arc<dyn Trait>`)。
/// - 事件发布失败只记录日志并计数，不会让整次分析失败。
pub struct AnalysisService {
    repository: Arc<dyn StockRepository>,
    publisher: Option<Arc<dyn EventPublisher>>,
    clock: Arc<dyn TimeProvider>,
    pipeline: AnalysisPipeline,
}

impl AnalysisService {
    pub fn new(
        repository: Arc<dyn StockRepository>,
        clock: Arc<dyn TimeProvider>,
        pipeline: AnalysisPipeline,
    ) -> Self {
        Self {
            repository,
            publisher: None,
            clock,
            pipeline,
        }
    }

    /// 挂载事件发布器，之后每条分析结果都会发布 `stock.analyzed` 事件。
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// # Summary
    /// 分析仓储中的全部评级记录。
    ///
    /// # Logic
    /// 1. 读取全部记录，读取期间响应取消信号；读取失败直接返回。
    /// 2. 以时钟给出的同一时刻运行分析流水线。
    /// 3. 若挂载了事件发布器，为每条结果发布事件，失败计入 `undelivered_events`。
    /// 4. 记录本次分析的数量与耗时。
    ///
    /// # Arguments
    /// * `cancel`: 取消信号。
    ///
    /// # Returns
    /// 成功返回 `AnalysisRun`，失败返回 `AnalysisError`。
    pub async fn analyze_stocks(&self, cancel: CancelSignal) -> Result<AnalysisRun, AnalysisError> {
        let started = Instant::now();

        let stocks = tokio::select! {
            biased;
            _ = cancel::cancelled(cancel.clone()) => return Err(AnalysisError::Cancelled),
            result = self.repository.find_all() => result.map_err(|source| {
                error!(operation = "fetching stocks for analysis", error = %source, "Repository read failed");
                AnalysisError::Repository {
                    operation: "fetching stocks for analysis",
                    source,
                }
            })?,
        };

        let now = self.clock.now();
        let analyses = self.pipeline.run(&stocks, now, &cancel)?;

        let mut undelivered_events = 0;
        if let Some(publisher) = &self.publisher {
            for analysis in &analyses {
                let event = StockAnalyzedEvent::new(
                    analysis.stock.id,
                    analysis.score,
                    analysis.indicators,
                    now,
                );
                if let Err(e) = publisher.publish(STOCK_ANALYZED_TOPIC, &event).await {
                    undelivered_events += 1;
                    warn!(stock_id = %analysis.stock.id, error = %e, "Failed to publish stock analyzed event");
                }
            }
        }

        info!(
            stocks_fetched = stocks.len(),
            stocks_analyzed = analyses.len(),
            undelivered_events,
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Stock analysis completed"
        );

        Ok(AnalysisRun {
            analyses,
            undelivered_events,
        })
    }
}
