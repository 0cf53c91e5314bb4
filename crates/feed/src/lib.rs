//! # `stockpick-feed` - 外部评级数据源
//!
//! 通过 HTTP 分页拉取分析师评级变动，并转换为领域实体 `StockRecord`。

pub mod client;
pub mod money;
