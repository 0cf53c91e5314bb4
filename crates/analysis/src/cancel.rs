//! 基于 `tokio::sync::watch` 的取消信号。
//!
//! 发送端写入 `true` 即表示取消；发送端被丢弃时视为永不取消。

use tokio::sync::watch;

/// 取消信号的接收端
pub type CancelSignal = watch::Receiver<bool>;

/// 创建一对取消信号收发端
pub fn channel() -> (watch::Sender<bool>, CancelSignal) {
    watch::channel(false)
}

/// 永远不会触发的取消信号
pub fn never() -> CancelSignal {
    watch::channel(false).1
}

/// 信号当前是否已取消
pub fn is_cancelled(signal: &CancelSignal) -> bool {
    *signal.borrow()
}

/// # Summary
/// 等待取消信号触发。
///
/// # Logic
/// 1. 已取消则立即返回。
/// 2. 否则等待值变化；发送端被丢弃后永远挂起，交由 `select!` 的另一分支完成。
pub async fn cancelled(mut signal: CancelSignal) {
    loop {
        if *signal.borrow_and_update() {
            return;
        }
        if signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
