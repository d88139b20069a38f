use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "monorail-api-server.log";

/// 初始化日志系统
///
/// 支持多种日志格式和输出方式：
/// - 标准错误（stderr，stdout 留给 MCP stdio 传输）
/// - JSON 格式（可选）
/// - 按天滚动的文件输出（可选）
///
/// 返回的 `WorkerGuard` 需要在进程生命周期内持有，否则文件日志会丢失。
pub fn init_logging(
    log_level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<Option<WorkerGuard>> {
    // 解析日志级别
    let level = parse_log_level(log_level);

    // 构建环境过滤器
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{}", level)))?;

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if json_format {
        // JSON 格式日志（适合生产环境）
        Registry::default()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        // 人类可读格式（适合开发环境）
        Registry::default()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::info!(
        log_level = %log_level,
        json_format = %json_format,
        log_dir = ?log_dir,
        "日志系统初始化完成"
    );

    Ok(guard)
}

/// 解析日志级别字符串
fn parse_log_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "⚠️  无效的日志级别 '{}', 使用默认值 'info'",
                level_str
            );
            Level::INFO
        }
    }
}
