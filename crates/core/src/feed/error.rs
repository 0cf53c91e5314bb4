use thiserror::Error;

/// # Summary
/// 外部评级数据源错误枚举，处理网络、解析等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum FeedError {
    // 网络层错误，包含底层 HTTP 客户端错误信息或非 2xx 状态码
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式不匹配、金额或时间无法解析
    #[error("Parse error: {0}")]
    Parse(String),
    // 客户端配置错误 (如缺少 base_url)
    #[error("Configuration error: {0}")]
    Config(String),
}
