//! # `stockpick-core` - 领域核心
//!
//! 定义分析师评级记录的实体、端口 (Port) 与错误类型。
//! 本 crate 不做任何 I/O，所有具体实现 (SQLite、HTTP Feed、事件总线) 由下游 crate 注入。

pub mod common;
pub mod config;

pub mod stock {
    pub mod entity;
    pub mod error;
    pub mod event;
    pub mod port;
}

pub mod analysis {
    pub mod entity;
    pub mod error;
}

pub mod store {
    pub mod error;
}

pub mod feed {
    pub mod error;
}

pub mod event {
    pub mod error;
    pub mod port;
}
