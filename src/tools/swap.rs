use crate::{
    error::Result,
    quote_api::QuoteApiClient,
    tools::into_tool_result,
    types::SwapRequest,
    validators::{validate_address, validate_trade_params},
};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use tracing::info;

/// 交换执行的输入校验：发送方地址必填
pub(crate) fn check_swap_request(request: &SwapRequest) -> Result<()> {
    validate_trade_params(
        &request.amount,
        request.slippage,
        request.deadline,
        request.max_hops,
    )?;
    validate_address(&request.sender, "sender")
}

/// 执行代币交换
///
/// 先报价确认，再请求上游生成交易。返回的交易尚未签名，
/// 签名和广播由调用方负责。
pub async fn execute_swap(
    quote_api: &QuoteApiClient,
    request: SwapRequest,
) -> Result<CallToolResult, McpError> {
    info!(
        from = %request.from,
        to = %request.to,
        amount = %request.amount,
        sender = %request.sender,
        "收到 execute_swap 请求"
    );

    let outcome = match check_swap_request(&request) {
        Ok(()) => quote_api.execute_swap(&request).await,
        Err(e) => Err(e),
    };

    into_tool_result("execute_swap", outcome)
}
