use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 日志文件名前缀，按天滚动
const LOG_FILE_PREFIX: &str = "stockpick.log";

/// # Summary
/// 初始化全局日志：控制台输出，配置了目录时额外写入按天滚动的文件。
///
/// # Arguments
/// * `directory` - 日志目录，`None` 时只输出到控制台。
///
/// # Returns
/// 文件写入器的 guard，必须持有到进程退出，否则缓冲的日志会丢失。
pub fn init(directory: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}
