//! 日志初始化：`RUST_LOG` 优先，否则使用传入的级别。

use tracing_subscriber::EnvFilter;

/// 安装全局 fmt 订阅者；重复调用不会 panic
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
