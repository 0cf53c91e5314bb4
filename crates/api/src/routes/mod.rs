//! # 路由控制器
//!
//! - `stocks`：评级记录的查询与同步。
//! - `analysis`：完整分析流程输出的推荐列表。

pub mod analysis;
pub mod stocks;
