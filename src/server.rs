use crate::{
    clients::MonorailClients,
    tools::{
        self, GetTokenRequest, GetTokensByCategoryRequest, GetTokensRequest,
        GetWalletBalancesRequest,
    },
    types::{QuoteRequest, SwapRequest},
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

const INSTRUCTIONS: &str = "Monorail DEX 聚合器工具。get_token / get_tokens / \
get_tokens_by_category / get_token_count / get_wallet_balances 查询代币数据；\
get_quote 获取报价；execute_swap 生成待签名的交换交易（不会签名或广播）。\
代币参数可以是地址、符号，或原生资产符号。";

/// Monorail MCP Server
/// 通过 MCP 提供代币查询、报价和交换工具
#[derive(Clone)]
pub struct MonorailServer {
    tool_router: ToolRouter<Self>,
    clients: MonorailClients,
    name: String,
    version: String,
}

/// 使用 tool_router 宏定义服务器工具
#[tool_router]
impl MonorailServer {
    /// 创建新的服务器实例
    pub fn new(clients: MonorailClients, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            clients,
            name: name.into(),
            version: version.into(),
        }
    }

    // ==================== 代币数据工具 ====================

    /// 按合约地址查询代币
    #[tool(description = "按合约地址查询代币详情（名称、符号、小数位、分类）。")]
    async fn get_token(
        &self,
        Parameters(request): Parameters<GetTokenRequest>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_token(self.clients.directory.as_ref(), request).await
    }

    /// 搜索代币
    #[tool(description = "按名称或符号搜索代币，支持 offset / limit 分页。")]
    async fn get_tokens(
        &self,
        Parameters(request): Parameters<GetTokensRequest>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_tokens(self.clients.directory.as_ref(), request).await
    }

    /// 按分类列出代币
    #[tool(description = "按分类列出代币：wallet、verified、stable、lst、bridged、meme。优先使用 verified 和 wallet，wallet 分类需要提供钱包地址。")]
    async fn get_tokens_by_category(
        &self,
        Parameters(request): Parameters<GetTokensByCategoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_tokens_by_category(self.clients.directory.as_ref(), request).await
    }

    /// 代币总数
    #[tool(description = "查询可用代币的总数。")]
    async fn get_token_count(&self) -> Result<CallToolResult, McpError> {
        tools::get_token_count(self.clients.directory.as_ref()).await
    }

    /// 钱包持仓
    #[tool(description = "查询钱包地址持有的所有代币余额。")]
    async fn get_wallet_balances(
        &self,
        Parameters(request): Parameters<GetWalletBalancesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_wallet_balances(self.clients.directory.as_ref(), request).await
    }

    // ==================== 交易工具 ====================

    /// 获取报价
    #[tool(description = "获取代币交换报价。from / to 可以是代币地址、符号（如 USDC）或原生资产 MON；amount 为人类可读数量。")]
    async fn get_quote(
        &self,
        Parameters(request): Parameters<QuoteRequest>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_quote(&self.clients.quote_api, request).await
    }

    /// 执行交换
    #[tool(description = "执行代币交换：先获取报价，再生成待签名的交易。sender 必填；返回的交易需要调用方自行签名和广播。")]
    async fn execute_swap(
        &self,
        Parameters(request): Parameters<SwapRequest>,
    ) -> Result<CallToolResult, McpError> {
        tools::execute_swap(&self.clients.quote_api, request).await
    }
}

/// 实现 ServerHandler trait 以处理 MCP 协议
#[tool_handler]
impl ServerHandler for MonorailServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
