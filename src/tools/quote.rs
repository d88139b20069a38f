use crate::{
    error::Result,
    quote_api::QuoteApiClient,
    tools::into_tool_result,
    types::QuoteRequest,
    validators::{validate_address, validate_trade_params},
};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use tracing::info;

/// 报价请求的输入校验，任何网络请求之前执行
pub(crate) fn check_quote_request(request: &QuoteRequest) -> Result<()> {
    validate_trade_params(
        &request.amount,
        request.slippage,
        request.deadline,
        request.max_hops,
    )?;
    if let Some(sender) = request.sender.as_deref().filter(|s| !s.is_empty()) {
        validate_address(sender, "sender")?;
    }
    Ok(())
}

/// 获取交换报价
///
/// # 参数
/// - `from` / `to`: 代币地址、符号或原生资产符号，调用前会被解析为地址
/// - `amount`: 人类可读数量
///
/// # 返回
/// - 上游原样返回的报价数据
pub async fn get_quote(
    quote_api: &QuoteApiClient,
    request: QuoteRequest,
) -> Result<CallToolResult, McpError> {
    info!(
        from = %request.from,
        to = %request.to,
        amount = %request.amount,
        "收到 get_quote 请求"
    );

    let outcome = match check_quote_request(&request) {
        Ok(()) => quote_api.get_quote(&request).await,
        Err(e) => Err(e),
    };

    into_tool_result("get_quote", outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Amount;

    fn request() -> QuoteRequest {
        QuoteRequest {
            amount: Amount::from("1"),
            from: "MON".to_string(),
            to: "USDC".to_string(),
            sender: None,
            slippage: Some(50),
            deadline: Some(60),
            max_hops: Some(3),
            excluded: None,
        }
    }

    #[test]
    fn test_valid_quote_request() {
        assert!(check_quote_request(&request()).is_ok());
    }

    #[test]
    fn test_sender_validated_when_present() {
        let mut req = request();
        req.sender = Some("not-an-address".to_string());
        assert_eq!(check_quote_request(&req).unwrap_err().field(), Some("sender"));

        // 空字符串视为未提供
        req.sender = Some(String::new());
        assert!(check_quote_request(&req).is_ok());
    }

    #[test]
    fn test_bounds_checked() {
        let mut req = request();
        req.deadline = Some(3_601);
        assert_eq!(check_quote_request(&req).unwrap_err().field(), Some("deadline"));

        let mut req = request();
        req.amount = Amount::from("0");
        assert_eq!(check_quote_request(&req).unwrap_err().field(), Some("amount"));
    }
}
