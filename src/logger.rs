use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认级别 info，`verbose` 时为 debug；`RUST_LOG` 优先。
/// 日志写到 stderr，不和课程内容混在一起。重复调用是安全的
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
