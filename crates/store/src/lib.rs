//! # `stockpick-store` - 评级记录持久化
//!
//! 提供 `StockRepository` 的两种实现：
//! - [`stock::SqliteStockRepository`]：基于 SQLite 的正式存储，数据库文件位于数据根目录下。
//! - [`memory::MemoryStockRepository`]：基于内存的实现，用于测试与一次性运行。

pub mod config;
pub mod memory;
pub mod stock;
