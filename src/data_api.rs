use crate::error::Result;
use crate::types::{
    CategoryOptions, SearchOptions, TokenBalance, TokenCategory, TokenDetails, TokenResult,
};
use crate::upstream::{send_json, trim_base_url};
use async_trait::async_trait;
use tracing::{error, instrument};

/// 代币数据服务的访问接口
///
/// 解析器和报价客户端只依赖这个 trait，测试时可以替换为内存实现。
#[async_trait]
pub trait TokenDirectory: Send + Sync {
    /// 按合约地址查询代币
    async fn get_token(&self, contract_address: &str) -> Result<TokenDetails>;

    /// 自由文本搜索代币（支持分页）
    async fn get_tokens(&self, options: &SearchOptions) -> Result<Vec<TokenResult>>;

    /// 按分类列出代币
    async fn get_tokens_by_category(
        &self,
        category: TokenCategory,
        options: &CategoryOptions,
    ) -> Result<Vec<TokenResult>>;

    /// 代币总数
    async fn get_token_count(&self) -> Result<u64>;

    /// 钱包持仓
    async fn get_wallet_balances(&self, address: &str) -> Result<Vec<TokenBalance>>;
}

/// Monorail Data API 客户端
#[derive(Clone)]
pub struct DataApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl DataApiClient {
    /// 创建新的 Data API 客户端
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: trim_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 记录已归类的错误后原样返回
fn log_failure<T>(result: Result<T>) -> Result<T> {
    if let Err(ref e) = result {
        error!(error = %e, kind = ?e.kind(), status = ?e.status(), "Data API 请求失败");
    }
    result
}

#[async_trait]
impl TokenDirectory for DataApiClient {
    #[instrument(skip(self))]
    async fn get_token(&self, contract_address: &str) -> Result<TokenDetails> {
        let request = self.http.get(self.url(&format!("/token/{}", contract_address)));
        log_failure(send_json(request).await)
    }

    #[instrument(skip(self))]
    async fn get_tokens(&self, options: &SearchOptions) -> Result<Vec<TokenResult>> {
        let request = self.http.get(self.url("/tokens")).query(options);
        log_failure(send_json(request).await)
    }

    #[instrument(skip(self))]
    async fn get_tokens_by_category(
        &self,
        category: TokenCategory,
        options: &CategoryOptions,
    ) -> Result<Vec<TokenResult>> {
        let request = self
            .http
            .get(self.url(&format!("/tokens/category/{}", category)))
            .query(options);
        log_failure(send_json(request).await)
    }

    #[instrument(skip(self))]
    async fn get_token_count(&self) -> Result<u64> {
        let request = self.http.get(self.url("/tokens/count"));
        log_failure(send_json(request).await)
    }

    #[instrument(skip(self))]
    async fn get_wallet_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        let request = self
            .http
            .get(self.url(&format!("/wallet/{}/balances", address)));
        log_failure(send_json(request).await)
    }
}
