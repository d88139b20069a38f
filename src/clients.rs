use crate::{
    config::ApiConfig,
    data_api::{DataApiClient, TokenDirectory},
    quote_api::QuoteApiClient,
    token_resolver::TokenResolver,
};
use std::{sync::Arc, time::Duration};
use tracing::info;

/// 两个上游服务的客户端集合，MCP 和 HTTP 两种入口共用
#[derive(Clone)]
pub struct MonorailClients {
    pub directory: Arc<dyn TokenDirectory>,
    pub quote_api: Arc<QuoteApiClient>,
}

impl MonorailClients {
    /// 根据配置创建客户端
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(concat!("monorail-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            data_api = %config.data_api_url,
            quote_api = %config.quote_api_url,
            "初始化 Monorail 客户端"
        );

        let directory: Arc<dyn TokenDirectory> =
            Arc::new(DataApiClient::new(http.clone(), &config.data_api_url));

        Ok(Self::with_directory(
            directory,
            http,
            &config.quote_api_url,
            &config.native_symbol,
            &config.source_id,
        ))
    }

    /// 使用给定的代币目录组装客户端
    pub fn with_directory(
        directory: Arc<dyn TokenDirectory>,
        http: reqwest::Client,
        quote_api_url: &str,
        native_symbol: &str,
        source_id: &str,
    ) -> Self {
        let resolver = TokenResolver::new(directory.clone(), native_symbol);
        let quote_api = Arc::new(QuoteApiClient::new(http, quote_api_url, resolver, source_id));
        Self {
            directory,
            quote_api,
        }
    }
}
