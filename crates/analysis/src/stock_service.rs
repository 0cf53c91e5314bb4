use crate::cancel::{self, CancelSignal};
use crate::ranking::{RankedStock, rank_by_score};
use crate::score::InvestmentScorer;
use std::sync::Arc;
use stockpick_core::common::time::TimeProvider;
use stockpick_core::stock::entity::StockRecord;
use stockpick_core::stock::error::StockError;
use stockpick_core::stock::port::{StockFeed, StockRepository};
use tracing::{debug, error, info};

/// # Summary
/// 股票记录应用服务：从外部数据源同步、列出全部记录、给出推荐列表。
///
/// # Invariants
/// - 仓储与数据源均通过构造函数注入。
/// - 推荐列表不做过期过滤与校验，需要完整分析请使用 `AnalysisService`。
pub struct StockService {
    repository: Arc<dyn StockRepository>,
    feed: Arc<dyn StockFeed>,
    scorer: InvestmentScorer,
    clock: Arc<dyn TimeProvider>,
}

impl StockService {
    pub fn new(
        repository: Arc<dyn StockRepository>,
        feed: Arc<dyn StockFeed>,
        scorer: InvestmentScorer,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            repository,
            feed,
            scorer,
            clock,
        }
    }

    /// # Summary
    /// 从外部数据源同步全部评级记录到仓储。
    ///
    /// # Logic
    /// 1. 拉取全部分页，拉取期间响应取消信号。
    /// 2. 逐条按 ticker upsert；首次保存失败即中止并返回带 ticker 的错误。
    ///
    /// # Arguments
    /// * `cancel`: 取消信号。
    ///
    /// # Returns
    /// 成功返回同步的记录数。
    pub async fn sync_from_feed(&self, cancel: CancelSignal) -> Result<usize, StockError> {
        info!("Starting stock synchronization from API");

        let stocks = tokio::select! {
            biased;
            _ = cancel::cancelled(cancel.clone()) => return Err(StockError::Cancelled),
            result = self.feed.fetch_stocks() => result.map_err(|source| {
                error!(error = %source, "Failed to fetch stocks from API");
                StockError::Feed { source }
            })?,
        };
        info!(count = stocks.len(), "Successfully fetched stocks from API");

        for stock in &stocks {
            if cancel::is_cancelled(&cancel) {
                return Err(StockError::Cancelled);
            }
            self.repository.save(stock).await.map_err(|source| {
                error!(ticker = %stock.ticker, error = %source, "Failed to save stock");
                StockError::Save {
                    ticker: stock.ticker.clone(),
                    source,
                }
            })?;
            debug!(ticker = %stock.ticker, id = %stock.id, "Stock saved successfully");
        }

        info!(total_synced = stocks.len(), "Stock synchronization completed");
        Ok(stocks.len())
    }

    /// 读取全部评级记录
    pub async fn all_stocks(&self) -> Result<Vec<StockRecord>, StockError> {
        self.repository
            .find_all()
            .await
            .map_err(|source| StockError::Repository {
                operation: "fetching all stocks",
                source,
            })
    }

    /// # Summary
    /// 推荐列表：全部记录按投资评分降序排列。
    ///
    /// # Returns
    /// 带评分的记录列表，包含完整分析流程会排除的过期或不合法记录。
    pub async fn recommended_stocks(&self) -> Result<Vec<RankedStock>, StockError> {
        let stocks = self
            .repository
            .find_all()
            .await
            .map_err(|source| StockError::Repository {
                operation: "fetching stocks",
                source,
            })?;
        Ok(rank_by_score(&self.scorer, stocks, self.clock.now()))
    }

    /// 按 ticker 查询单条记录，不存在返回 `StockError::NotFound`。
    pub async fn stock_by_ticker(&self, ticker: &str) -> Result<StockRecord, StockError> {
        self.repository
            .find_by_ticker(ticker)
            .await
            .map_err(|source| StockError::Repository {
                operation: "finding stock by ticker",
                source,
            })?
            .ok_or_else(|| StockError::NotFound(ticker.to_string()))
    }
}
