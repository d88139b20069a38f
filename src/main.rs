use monorail_mcp_server::{config::Config, logging, MonorailClients, MonorailServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    // 初始化日志（输出到 stderr，stdout 留给 MCP 协议）
    let _guard = logging::init_logging(
        &config.server.log_level,
        config.server.log_json_format,
        config.server.log_dir.as_deref(),
    )?;

    tracing::info!("🚀 启动 Monorail MCP Server...");
    config.print_info();

    // 创建服务器实例
    let clients = MonorailClients::from_config(&config.api)?;
    let server = MonorailServer::new(clients, &config.server.name, &config.server.version);

    // 创建 stdio 传输层
    let transport = stdio();

    // 启动服务器
    tracing::info!("✅ MCP Server 已就绪，等待客户端连接...");
    tracing::info!(
        "📋 可用工具: get_token, get_tokens, get_tokens_by_category, get_token_count, get_wallet_balances, get_quote, execute_swap"
    );

    let service = server.serve(transport).await?;

    // 等待服务器关闭
    let quit_reason = service.waiting().await?;
    tracing::info!("👋 MCP Server 关闭，原因: {:?}", quit_reason);

    Ok(())
}
