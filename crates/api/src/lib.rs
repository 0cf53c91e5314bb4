//! # `stockpick-api` - HTTP API 网关
//!
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收浏览器或前端的 HTTP 请求
//! - 调用 `StockService` 与 `AnalysisService` 完成同步、查询与分析
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
