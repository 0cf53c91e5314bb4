//! # `stockpick-analysis` - 评分与分析流水线
//!
//! 把分析师评级记录转换为排序后的投资建议：
//! - [`rating`]: 评级层级表与评级跨度校验
//! - [`broker`]: 券商声望分级表
//! - [`score`]: 五因子投资评分
//! - [`indicators`]: 随评分输出的解释性指标
//! - [`recommendation`]: 评分到建议标签的映射
//! - [`pipeline`]: 过期过滤、逐条校验、评分、排序
//! - [`ranking`]: 不做校验的轻量排序视图
//! - [`service`] / [`stock_service`]: 面向仓储、数据源和事件总线的应用服务

pub mod broker;
pub mod cancel;
pub mod indicators;
pub mod pipeline;
pub mod ranking;
pub mod rating;
pub mod recommendation;
pub mod score;
pub mod service;
pub mod stock_service;
