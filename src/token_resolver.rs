use crate::data_api::TokenDirectory;
use crate::error::{MonorailError, Result};
use crate::types::{CategoryOptions, SearchOptions, TokenCategory, TokenResult, NATIVE_TOKEN_ADDRESS};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// 代币解析器
/// 将代币符号、原生资产别名或地址解析为合约地址
///
/// 查找顺序：地址原样返回 → 原生资产 → verified 分类 → 全文搜索。
/// 中间的目录查询失败只记录日志并视为未命中，最终统一返回 `TokenNotFound`。
#[derive(Clone)]
pub struct TokenResolver {
    directory: Arc<dyn TokenDirectory>,
    native_symbol: String,
}

impl TokenResolver {
    pub fn new(directory: Arc<dyn TokenDirectory>, native_symbol: impl Into<String>) -> Self {
        Self {
            directory,
            native_symbol: native_symbol.into(),
        }
    }

    pub fn native_symbol(&self) -> &str {
        &self.native_symbol
    }

    /// 解析代币地址或符号
    #[instrument(skip(self))]
    pub async fn resolve(&self, identifier: &str) -> Result<String> {
        // 已经是地址：不做大小写归一化，也不校验 checksum
        if looks_like_address(identifier) {
            return Ok(identifier.to_string());
        }

        if identifier.eq_ignore_ascii_case(&self.native_symbol) {
            return Ok(NATIVE_TOKEN_ADDRESS.to_string());
        }

        if let Some(address) = self.lookup_symbol(identifier).await {
            debug!(identifier = %identifier, address = %address, "代币解析成功");
            return Ok(address);
        }

        Err(MonorailError::TokenNotFound(identifier.to_string()))
    }

    async fn lookup_symbol(&self, identifier: &str) -> Option<String> {
        let verified = self
            .directory
            .get_tokens_by_category(TokenCategory::Verified, &CategoryOptions::default())
            .await;

        match verified {
            Ok(tokens) => {
                if let Some(token) = find_by_symbol(&tokens, identifier) {
                    return Some(token.address.clone());
                }
            }
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "查询 verified 代币失败，视为未命中");
                return None;
            }
        }

        match self.directory.get_tokens(&SearchOptions::find(identifier)).await {
            Ok(tokens) => find_by_symbol(&tokens, identifier)
                .or_else(|| tokens.first())
                .map(|t| t.address.clone()),
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "搜索代币失败，视为未命中");
                None
            }
        }
    }
}

/// `0x` 开头且长度至少 40 即视为地址
fn looks_like_address(identifier: &str) -> bool {
    identifier.starts_with("0x") && identifier.len() >= 40
}

fn find_by_symbol<'a>(tokens: &'a [TokenResult], symbol: &str) -> Option<&'a TokenResult> {
    tokens.iter().find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}
