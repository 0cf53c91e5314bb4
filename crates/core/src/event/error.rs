use thiserror::Error;

/// # Summary
/// 事件发布错误枚举。
#[derive(Error, Debug)]
pub enum EventError {
    /// 订阅者处理事件失败
    #[error("Handler error on topic {topic}: {message}")]
    Handler { topic: String, message: String },
    /// 事件序列化失败
    #[error("Serialization error: {0}")]
    Serialization(String),
}
