use crate::{
    data_api::TokenDirectory,
    tools::into_tool_result,
    types::{CategoryOptions, SearchOptions, TokenCategory},
    types::{int_from_text_or_number, optional_int_from_text_or_number},
    validators::{validate_address, validate_pagination},
};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 分类查询默认分页
pub const DEFAULT_CATEGORY_OFFSET: i64 = 0;
pub const DEFAULT_CATEGORY_LIMIT: i64 = 500;

/// 按地址查询代币请求参数
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetTokenRequest {
    /// 代币合约地址
    #[serde(rename = "contractAddress")]
    pub contract_address: String,
}

/// 搜索代币请求参数
#[derive(Debug, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetTokensRequest {
    /// 代币名称或符号的部分匹配
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub find: Option<String>,

    /// 列表起始偏移量
    #[serde(
        default,
        deserialize_with = "optional_int_from_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<i64>")]
    pub offset: Option<i64>,

    /// 最多返回的代币数量（1-1000）
    #[serde(
        default,
        deserialize_with = "optional_int_from_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<i64>")]
    pub limit: Option<i64>,
}

/// 按分类查询代币请求参数
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetTokensByCategoryRequest {
    /// 代币分类，优先使用 verified 和 wallet，使用其他分类前应先确认
    pub category: TokenCategory,

    /// 需要附带余额的钱包地址（wallet 分类需要）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// 分页偏移量，默认 0
    #[serde(default = "default_offset", deserialize_with = "int_from_text_or_number")]
    #[schemars(with = "i64")]
    pub offset: i64,

    /// 最多返回数量，默认 500
    #[serde(default = "default_limit", deserialize_with = "int_from_text_or_number")]
    #[schemars(with = "i64")]
    pub limit: i64,
}

fn default_offset() -> i64 {
    DEFAULT_CATEGORY_OFFSET
}

fn default_limit() -> i64 {
    DEFAULT_CATEGORY_LIMIT
}

impl From<GetTokensRequest> for SearchOptions {
    fn from(request: GetTokensRequest) -> Self {
        Self {
            find: request.find,
            offset: request.offset,
            limit: request.limit,
        }
    }
}

/// 按合约地址查询代币
pub async fn get_token(
    directory: &dyn TokenDirectory,
    request: GetTokenRequest,
) -> Result<CallToolResult, McpError> {
    info!(address = %request.contract_address, "收到 get_token 请求");

    let outcome = match validate_address(&request.contract_address, "contractAddress") {
        Ok(()) => directory.get_token(&request.contract_address).await,
        Err(e) => Err(e),
    };

    into_tool_result("get_token", outcome)
}

/// 搜索代币
pub async fn get_tokens(
    directory: &dyn TokenDirectory,
    request: GetTokensRequest,
) -> Result<CallToolResult, McpError> {
    info!(find = ?request.find, "收到 get_tokens 请求");

    let outcome = match validate_pagination(request.offset, request.limit) {
        Ok(()) => directory.get_tokens(&request.into()).await,
        Err(e) => Err(e),
    };

    into_tool_result("get_tokens", outcome)
}

/// 按分类列出代币
pub async fn get_tokens_by_category(
    directory: &dyn TokenDirectory,
    request: GetTokensByCategoryRequest,
) -> Result<CallToolResult, McpError> {
    info!(category = %request.category, "收到 get_tokens_by_category 请求");

    let outcome = match check_category_request(&request) {
        Ok(()) => {
            let options = CategoryOptions {
                address: request.address,
                offset: Some(request.offset),
                limit: Some(request.limit),
            };
            directory
                .get_tokens_by_category(request.category, &options)
                .await
        }
        Err(e) => Err(e),
    };

    into_tool_result("get_tokens_by_category", outcome)
}

/// 查询代币总数
pub async fn get_token_count(directory: &dyn TokenDirectory) -> Result<CallToolResult, McpError> {
    info!("收到 get_token_count 请求");
    into_tool_result("get_token_count", directory.get_token_count().await)
}

/// 分类查询的参数校验
///
/// wallet 分类缺少地址时只记录警告，交由上游决定返回内容。
pub(crate) fn check_category_request(
    request: &GetTokensByCategoryRequest,
) -> crate::error::Result<()> {
    if let Some(ref address) = request.address {
        validate_address(address, "address")?;
    } else if request.category == TokenCategory::Wallet {
        warn!("wallet 分类未提供地址，直接转发给上游");
    }
    validate_pagination(Some(request.offset), Some(request.limit))
}
