//! # `stockpick-bus` - 进程内事件总线
//!
//! `EventPublisher` 的内存实现，以及随总线提供的日志订阅者。

pub mod handler;
pub mod memory;
