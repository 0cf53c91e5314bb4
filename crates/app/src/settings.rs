use config::{Config, ConfigError, Environment, File};
use std::collections::HashMap;
use stockpick_core::config::AppConfig;

/// 环境变量前缀，例如 `STOCKPICK__SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "STOCKPICK";

/// 缺省配置文件 (不含扩展名)，文件不存在时跳过
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// # Summary
/// 按优先级合并配置：内置默认值 < 配置文件 < 环境变量。
///
/// # Arguments
/// * `file` - 配置文件路径 (不含扩展名)，可选。
/// * `env` - 用于替代进程环境变量的键值表，测试中使用；`None` 时读取进程环境。
///
/// # Returns
/// 合并后的 `AppConfig`，格式错误时返回 `ConfigError`。
pub fn load(file: &str, env: Option<HashMap<String, String>>) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize()
}
