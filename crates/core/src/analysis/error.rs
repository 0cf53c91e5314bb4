use crate::stock::entity::Rating;
use crate::store::error::StoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// # Summary
/// 分析流程错误枚举。
///
/// # Invariants
/// - 单条记录级错误 (`AnalysisNotPossible`、`InvalidRatingTransition`、`InvalidPriceTarget`)
///   在流程内部被记录并跳过，不会中断整批分析。
/// - 批次级错误 (空输入、过滤后无结果、仓储失败、取消) 会返回给调用方。
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// 数据不足以完成分析 (目标价非正、评级缺失，或整批为空)
    #[error("insufficient data to perform analysis: {0}")]
    AnalysisNotPossible(String),
    /// 单次评级变动跨越了一个以上的层级
    #[error("invalid rating transition detected: {from} -> {to}")]
    InvalidRatingTransition { from: Rating, to: Rating },
    /// 目标价前后相同
    #[error("target price must change, got {amount} on both sides")]
    InvalidPriceTarget { amount: Decimal },
    /// 所有记录都已过期或未通过校验
    #[error("stock data is too old for accurate analysis")]
    StaleData,
    /// 读取记录失败
    #[error("error {operation}: {source}")]
    Repository {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
    /// 调用方在分析完成前取消
    #[error("analysis cancelled")]
    Cancelled,
}
