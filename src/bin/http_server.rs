use monorail_mcp_server::{config::Config, http_api, logging, MonorailClients};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    let _guard = logging::init_logging(
        &config.server.log_level,
        config.server.log_json_format,
        config.server.log_dir.as_deref(),
    )?;

    config.print_info();

    let clients = MonorailClients::from_config(&config.api)?;
    let app = http_api::router(clients);

    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 Monorail DEX API Server 监听 http://{}", addr);
    tracing::info!("🔗 接口位于 http://{}/api/*", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("👋 收到退出信号，正在关闭...");
        })
        .await?;

    Ok(())
}
