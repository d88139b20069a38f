use crate::error::{classify, MonorailError, Result};
use crate::token_resolver::TokenResolver;
use crate::types::{QuoteRequest, SwapRequest, SwapResult};
use crate::upstream::{send_json, trim_base_url};
use serde_json::Value;
use tracing::{error, info, instrument};

pub const SWAP_SUCCESS_MESSAGE: &str = "Swap executed successfully";

/// Monorail Quote API（pathfinder）客户端
///
/// 报价和交换都先通过 [`TokenResolver`] 解析代币，并附带固定的 `source`
/// 参数用于手续费归属。
#[derive(Clone)]
pub struct QuoteApiClient {
    http: reqwest::Client,
    base_url: String,
    resolver: TokenResolver,
    source_id: String,
}

impl QuoteApiClient {
    /// 创建新的 Quote API 客户端
    ///
    /// # 参数
    /// - `base_url`: pathfinder 根地址，`/quote` 和 `/swap` 拼接在其后
    /// - `source_id`: 手续费归属标识
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        resolver: TokenResolver,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: trim_base_url(base_url),
            resolver,
            source_id: source_id.into(),
        }
    }

    pub fn resolver(&self) -> &TokenResolver {
        &self.resolver
    }

    /// 获取交换报价
    ///
    /// 代币解析失败原样返回（通常是 `TokenNotFound`），
    /// 请求失败归类后包装为 `Quote`。
    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to))]
    pub async fn get_quote(&self, request: &QuoteRequest) -> Result<Value> {
        let from = self.resolver.resolve(&request.from).await?;
        let to = self.resolver.resolve(&request.to).await?;

        let params = self.trade_params(request, &from, &to);
        let http_request = self
            .http
            .get(format!("{}/quote", self.base_url))
            .query(&params);

        let quote = send_json::<Value>(http_request).await.map_err(|e| {
            error!(error = %e, "报价请求失败");
            MonorailError::Quote(Box::new(classify(e)))
        })?;

        info!(from = %from, to = %to, "成功获取报价");
        Ok(quote)
    }

    /// 执行交换
    ///
    /// 两阶段：先报价，再重新解析代币并 POST 到 `/swap`。
    /// 两阶段之间没有原子性，POST 不幂等，因此从不自动重试。
    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to, sender = %request.sender))]
    pub async fn execute_swap(&self, request: &SwapRequest) -> Result<SwapResult> {
        self.try_execute_swap(request).await.map_err(|e| {
            error!(error = %e, "交换执行失败");
            MonorailError::SwapExecution(Box::new(e))
        })
    }

    async fn try_execute_swap(&self, request: &SwapRequest) -> Result<SwapResult> {
        let quote = self.get_quote(&request.to_quote_request()).await?;

        let from = self.resolver.resolve(&request.from).await?;
        let to = self.resolver.resolve(&request.to).await?;

        let params = self.trade_params(&request.to_quote_request(), &from, &to);
        let http_request = self
            .http
            .post(format!("{}/swap", self.base_url))
            .query(&params);

        let transaction = send_json::<Value>(http_request).await?;

        info!(from = %from, to = %to, "交换交易已生成");

        Ok(SwapResult {
            quote,
            transaction,
            success: true,
            message: SWAP_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// 构造报价 / 交换共用的查询参数
    fn trade_params(
        &self,
        request: &QuoteRequest,
        from: &str,
        to: &str,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("amount", request.amount.to_query_value()),
            ("from", from.to_string()),
            ("to", to.to_string()),
        ];

        if let Some(sender) = request.sender.as_ref().filter(|s| !s.is_empty()) {
            params.push(("sender", sender.clone()));
        }
        if let Some(slippage) = request.slippage {
            params.push(("slippage", slippage.to_string()));
        }
        if let Some(deadline) = request.deadline {
            params.push(("deadline", deadline.to_string()));
        }
        if let Some(max_hops) = request.max_hops {
            params.push(("max_hops", max_hops.to_string()));
        }
        if let Some(excluded) = request.excluded.as_ref().filter(|s| !s.is_empty()) {
            params.push(("excluded", excluded.clone()));
        }
        params.push(("source", self.source_id.clone()));

        params
    }
}
