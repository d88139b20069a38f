use crate::{data_api::TokenDirectory, tools::into_tool_result, validators::validate_address};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 查询钱包持仓请求参数
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetWalletBalancesRequest {
    /// 需要查询持仓的钱包地址
    pub address: String,
}

/// 查询钱包持有的全部代币余额
///
/// # 参数
/// - `address`: 钱包地址，必须是 `0x` 开头的 40 位十六进制
///
/// # 返回
/// - 每个持仓的代币信息和余额（上游格式化后的字符串）
pub async fn get_wallet_balances(
    directory: &dyn TokenDirectory,
    request: GetWalletBalancesRequest,
) -> Result<CallToolResult, McpError> {
    info!(address = %request.address, "收到 get_wallet_balances 请求");

    let outcome = match validate_address(&request.address, "address") {
        Ok(()) => directory.get_wallet_balances(&request.address).await,
        Err(e) => Err(e),
    };

    into_tool_result("get_wallet_balances", outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_resolver::tests::StaticDirectory;
    use crate::tools::tests::unpack;

    #[test]
    fn test_balance_request_deserialization() {
        let json = r#"{"address": "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0"}"#;
        let request: GetWalletBalancesRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.address, "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0");
    }

    #[tokio::test]
    async fn test_invalid_wallet_address() {
        let directory = StaticDirectory::default();
        let request = GetWalletBalancesRequest {
            address: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb".to_string(),
        };
        let (text, is_error) = unpack(&get_wallet_balances(&directory, request).await.unwrap());
        assert!(is_error);
        assert_eq!(text, "Error: address must be 42 characters long");
    }

    #[tokio::test]
    async fn test_empty_wallet() {
        let directory = StaticDirectory::default();
        let request = GetWalletBalancesRequest {
            address: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0".to_string(),
        };
        let (text, is_error) = unpack(&get_wallet_balances(&directory, request).await.unwrap());
        assert!(!is_error);
        assert_eq!(text, "[]");
    }
}
