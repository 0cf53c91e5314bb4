use crate::cancel::{self, CancelSignal};
use crate::indicators;
use crate::ranking::compare_ranked;
use crate::recommendation::classify;
use crate::score::InvestmentScorer;
use chrono::{DateTime, Duration, Utc};
use stockpick_core::analysis::entity::StockAnalysis;
use stockpick_core::analysis::error::AnalysisError;
use stockpick_core::stock::entity::StockRecord;
use tracing::{debug, warn};

/// 缺省新鲜度窗口 (小时)
pub const DEFAULT_FRESHNESS_HOURS: i64 = 24;

/// # Summary
/// 分析流水线：过期过滤 → 逐条校验 → 评分与指标 → 分类 → 排序。
///
/// # Invariants
/// - 不做任何 I/O，只处理调用方交给它的记录切片。
/// - 单条记录的失败只记录日志并跳过，不会中断整批分析。
/// - 取消信号触发后立即返回 `Cancelled`，不返回部分结果。
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    scorer: InvestmentScorer,
    freshness_window: Duration,
}

impl AnalysisPipeline {
    pub fn new(scorer: InvestmentScorer, freshness_window: Duration) -> Self {
        Self {
            scorer,
            freshness_window,
        }
    }

    /// 记录发布时间距今是否超过新鲜度窗口 (恰好等于窗口时仍视为新鲜)。
    pub fn is_stale(&self, stock: &StockRecord, now: DateTime<Utc>) -> bool {
        now - stock.observed_at > self.freshness_window
    }

    /// # Summary
    /// 校验并分析单条记录。
    ///
    /// # Logic
    /// 1. 数据完整性：两个目标价都大于 0，两个评级都非空，否则 `AnalysisNotPossible`。
    /// 2. 评级跨度：跨越一个以上层级返回 `InvalidRatingTransition`。
    /// 3. 目标价必须发生变动，否则 `InvalidPriceTarget`。
    /// 4. 计算评分、指标与建议标签。
    ///
    /// # Arguments
    /// * `stock`: 评级记录。
    /// * `now`: 评估时刻。
    ///
    /// # Returns
    /// 分析结果或单条记录级错误。
    pub fn analyze_one(
        &self,
        stock: &StockRecord,
        now: DateTime<Utc>,
    ) -> Result<StockAnalysis, AnalysisError> {
        let target = &stock.target;
        let rating = &stock.rating;

        if !target.from.is_positive() || !target.to.is_positive() {
            return Err(AnalysisError::AnalysisNotPossible(format!(
                "{}: target prices must be positive ({} -> {})",
                stock.ticker, target.from, target.to
            )));
        }
        if rating.from.is_empty() || rating.to.is_empty() {
            return Err(AnalysisError::AnalysisNotPossible(format!(
                "{}: rating change is incomplete",
                stock.ticker
            )));
        }

        if !self.scorer.scale().is_valid_transition(&rating.from, &rating.to) {
            return Err(AnalysisError::InvalidRatingTransition {
                from: rating.from.clone(),
                to: rating.to.clone(),
            });
        }

        if target.from.amount == target.to.amount {
            return Err(AnalysisError::InvalidPriceTarget {
                amount: target.from.amount,
            });
        }

        let score = self.scorer.score(stock, now);
        Ok(StockAnalysis {
            stock: stock.clone(),
            score,
            indicators: indicators::compute(&self.scorer, stock),
            recommendation: classify(score),
            computed_at: now,
        })
    }

    /// # Summary
    /// 对一批记录执行完整分析。
    ///
    /// # Logic
    /// 1. 输入为空返回 `AnalysisNotPossible`。
    /// 2. 逐条检查取消信号；已取消则返回 `Cancelled`。
    /// 3. 跳过过期记录 (不计为失败)。
    /// 4. 对其余记录调用 `analyze_one`，失败的记录记 warn 日志后跳过。
    /// 5. 一条结果都没有时返回 `StaleData`。
    /// 6. 按评分降序排序，同分时较新的记录在前，再按 ticker 升序。
    ///
    /// # Arguments
    /// * `stocks`: 待分析的记录。
    /// * `now`: 评估时刻，整批共享同一时刻。
    /// * `cancel`: 取消信号。
    ///
    /// # Returns
    /// 排好序的分析结果或批次级错误。
    pub fn run(
        &self,
        stocks: &[StockRecord],
        now: DateTime<Utc>,
        cancel: &CancelSignal,
    ) -> Result<Vec<StockAnalysis>, AnalysisError> {
        if stocks.is_empty() {
            return Err(AnalysisError::AnalysisNotPossible(
                "no stock records available".to_string(),
            ));
        }

        let mut analyses = Vec::with_capacity(stocks.len());
        let mut stale = 0usize;
        let mut rejected = 0usize;

        for stock in stocks {
            if cancel::is_cancelled(cancel) {
                return Err(AnalysisError::Cancelled);
            }

            if self.is_stale(stock, now) {
                stale += 1;
                debug!(ticker = %stock.ticker, observed_at = %stock.observed_at, "Skipping stale stock record");
                continue;
            }

            match self.analyze_one(stock, now) {
                Ok(analysis) => {
                    debug!(
                        stock_id = %stock.id,
                        ticker = %stock.ticker,
                        score = analysis.score,
                        "Stock analysis completed"
                    );
                    analyses.push(analysis);
                }
                Err(e) => {
                    rejected += 1;
                    warn!(
                        operation = "analyzing stock",
                        stock_id = %stock.id,
                        ticker = %stock.ticker,
                        error = %e,
                        "Stock record skipped"
                    );
                }
            }
        }

        if analyses.is_empty() {
            return Err(AnalysisError::StaleData);
        }

        analyses.sort_by(|a, b| compare_ranked(a.score, &a.stock, b.score, &b.stock));

        debug!(
            analyzed = analyses.len(),
            stale, rejected, "Analysis batch finished"
        );
        Ok(analyses)
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(
            InvestmentScorer::standard(),
            Duration::hours(DEFAULT_FRESHNESS_HOURS),
        )
    }
}
