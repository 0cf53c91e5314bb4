use thiserror::Error;

/// # Summary
/// 存储层错误枚举，处理数据库连接、读写失败以及行数据损坏等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 数据库操作失败
    #[error("Database error: {0}")]
    Database(String),
    /// 行数据无法还原为实体 (例如金额文本损坏)
    #[error("Decode error: {0}")]
    Decode(String),
    /// 初始化存储失败
    #[error("Initialization error: {0}")]
    InitError(String),
}
