/// Monorail MCP 工具模块
///
/// - `token`: 代币查询（按地址、搜索、分类、总数）
/// - `balance`: 钱包持仓
/// - `quote`: 获取交换报价
/// - `swap`: 执行交换（生成待签名交易）

pub mod balance;
pub mod quote;
pub mod swap;
pub mod token;

use crate::error::MonorailError;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;
use tracing::{error, info};

// 重新导出主要类型，方便外部使用
pub use balance::{get_wallet_balances, GetWalletBalancesRequest};
pub use quote::get_quote;
pub use swap::execute_swap;
pub use token::{
    get_token, get_token_count, get_tokens, get_tokens_by_category, GetTokenRequest,
    GetTokensByCategoryRequest, GetTokensRequest,
};

/// 将领域调用结果转换为 MCP 工具结果
///
/// 领域错误不会向上抛出，而是返回 `isError: true` 的文本结果；
/// 只有序列化失败才作为协议错误返回。
pub(crate) fn into_tool_result<T: Serialize>(
    tool: &str,
    outcome: Result<T, MonorailError>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            info!(tool = %tool, "工具调用成功");
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(e) => {
            error!(tool = %tool, error = %e, kind = ?e.kind(), "工具调用失败");
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {}",
                e
            ))]))
        }
    }
}
