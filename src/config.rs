use std::env;

/// 服务器配置结构体
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 服务器名称
    pub name: String,
    /// 服务器版本
    pub version: String,
    /// 日志级别
    pub log_level: String,
    /// 是否启用 JSON 格式日志
    pub log_json_format: bool,
    /// 日志文件目录（可选，按天滚动）
    pub log_dir: Option<String>,
}

/// Monorail API 配置
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Data API 地址
    pub data_api_url: String,
    /// Quote API（pathfinder）地址
    pub quote_api_url: String,
    /// 手续费归属标识，附加到每个报价 / 交换请求的 `source` 参数
    pub source_id: String,
    /// 原生资产符号
    pub native_symbol: String,
    /// HTTP 请求超时时间（秒）
    pub http_timeout: u64,
}

/// HTTP 服务配置
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

/// 完整配置
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub http: HttpConfig,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> anyhow::Result<Self> {
        // 尝试加载 .env 文件（如果存在）
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源加载配置（测试时无需修改进程环境变量）
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.is_empty());

        let server = ServerConfig {
            name: var("SERVER_NAME").unwrap_or_else(|| "monorail-api-server".to_string()),
            version: var("SERVER_VERSION").unwrap_or_else(|| "0.2.0".to_string()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json_format: var("LOG_JSON_FORMAT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            log_dir: var("LOG_DIR"),
        };

        let api = ApiConfig {
            data_api_url: var("DATA_API_URL")
                .unwrap_or_else(|| "https://testnet-api.monorail.xyz/v1".to_string()),
            quote_api_url: var("QUOTE_API_URL")
                .unwrap_or_else(|| "https://testnet-pathfinder.monorail.xyz/v4".to_string()),
            source_id: var("MONORAIL_SOURCE_ID").unwrap_or_else(|| "1300175433951702".to_string()),
            native_symbol: var("NATIVE_TOKEN_SYMBOL").unwrap_or_else(|| "MON".to_string()),
            http_timeout: var("HTTP_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        };

        let http = HttpConfig {
            host: var("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match var("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT 无效: {}", port))?,
                None => 3001,
            },
        };

        Ok(Config { server, api, http })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("DATA_API_URL", &self.api.data_api_url),
            ("QUOTE_API_URL", &self.api.quote_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} 必须以 http:// 或 https:// 开头: {}", name, url);
            }
        }

        if self.api.source_id.trim().is_empty() {
            anyhow::bail!("MONORAIL_SOURCE_ID 不能为空");
        }

        if self.api.native_symbol.trim().is_empty() {
            anyhow::bail!("NATIVE_TOKEN_SYMBOL 不能为空");
        }

        if self.api.http_timeout == 0 {
            anyhow::bail!("HTTP_TIMEOUT 必须大于 0");
        }

        Ok(())
    }

    /// 打印配置信息
    pub fn print_info(&self) {
        eprintln!("📋 配置信息:");
        eprintln!("  服务器名称: {}", self.server.name);
        eprintln!("  服务器版本: {}", self.server.version);
        eprintln!("  日志级别: {}", self.server.log_level);
        eprintln!("  JSON 日志: {}", self.server.log_json_format);
        if let Some(ref dir) = self.server.log_dir {
            eprintln!("  日志目录: {}", dir);
        }

        eprintln!("\n🌐 Monorail API:");
        eprintln!("  Data API: {}", self.api.data_api_url);
        eprintln!("  Quote API: {}", self.api.quote_api_url);
        eprintln!("  Source ID: {}", self.api.source_id);
        eprintln!("  原生资产: {}", self.api.native_symbol);
        eprintln!("  HTTP 超时: {}s", self.api.http_timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]).expect("应该能创建默认配置");
        assert_eq!(config.server.name, "monorail-api-server");
        assert_eq!(config.api.native_symbol, "MON");
        assert_eq!(config.api.source_id, "1300175433951702");
        assert_eq!(config.api.data_api_url, "https://testnet-api.monorail.xyz/v1");
        assert_eq!(config.http.port, 3001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("QUOTE_API_URL", "http://localhost:8080/v4"),
            ("MONORAIL_SOURCE_ID", "42"),
            ("LOG_JSON_FORMAT", "true"),
            ("PORT", "8081"),
            ("HTTP_TIMEOUT", ""),
        ])
        .unwrap();
        assert_eq!(config.api.quote_api_url, "http://localhost:8080/v4");
        assert_eq!(config.api.source_id, "42");
        assert!(config.server.log_json_format);
        assert_eq!(config.http.port, 8081);
        // 空值回落到默认值
        assert_eq!(config.api.http_timeout, 30);
    }

    #[test]
    fn test_invalid_port() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_url_validation() {
        let mut config = config_from(&[]).unwrap();
        config.api.data_api_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_and_timeout_validation() {
        let mut config = config_from(&[]).unwrap();
        config.api.source_id = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = config_from(&[]).unwrap();
        config.api.http_timeout = 0;
        assert!(config.validate().is_err());
    }
}
