use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 原生资产（MON）的占位地址
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// 代币详情（`GET /token/:address`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "decimals_from_text_or_number")]
    pub decimals: u8,
    #[serde(default)]
    pub categories: Vec<String>,
    /// 未声明的上游字段，原样透传
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 代币列表条目（`GET /tokens`、`GET /tokens/category/:category`）
///
/// 上游以字符串返回 `decimals`，在这里统一为整数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResult {
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "decimals_from_text_or_number")]
    pub decimals: u8,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon_per_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_per_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pconf: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 钱包持仓（`GET /wallet/:address/balances`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub address: String,
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "decimals_from_text_or_number")]
    pub decimals: u8,
    #[serde(default)]
    pub categories: Vec<String>,
    pub balance: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 代币分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// 需要同时提供钱包地址
    Wallet,
    Verified,
    Stable,
    Lst,
    Bridged,
    Meme,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Verified => "verified",
            Self::Stable => "stable",
            Self::Lst => "lst",
            Self::Bridged => "bridged",
            Self::Meme => "meme",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 人类可读数量，接受字符串或数字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(f64),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Amount {
    /// 发往上游的文本：去掉首尾空白，科学计数法展开为普通小数
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => {
                let s = s.trim();
                if !s.contains(['e', 'E']) {
                    return s.to_string();
                }
                Decimal::from_scientific(s)
                    .map(|d| d.normalize().to_string())
                    .or_else(|_| s.parse::<f64>().map(|n| n.to_string()))
                    .unwrap_or_else(|_| s.to_string())
            }
        }
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// 报价请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuoteRequest {
    /// 人类可读的交换数量
    pub amount: Amount,
    /// 源代币：地址、符号或原生资产符号
    pub from: String,
    /// 目标代币：地址、符号或原生资产符号
    pub to: String,
    /// 执行交易的钱包地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// 滑点容差（基点，默认 50 = 0.5%）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage: Option<i64>,
    /// 截止时间（秒，默认 60，最大 3600）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
    /// 最大跳数（1-5，默认 3）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<i64>,
    /// 需要排除的协议，逗号分隔
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded: Option<String>,
}

/// 交换执行请求（`sender` 必填）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwapRequest {
    /// 人类可读的交换数量
    pub amount: Amount,
    /// 源代币
    pub from: String,
    /// 目标代币
    pub to: String,
    /// 执行交易的钱包地址（交换必填）
    pub sender: String,
    /// 滑点容差（基点，默认 50 = 0.5%）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage: Option<i64>,
    /// 截止时间（秒，默认 60，最大 3600）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
    /// 最大跳数（1-5，默认 3）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<i64>,
    /// 需要排除的协议，逗号分隔
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded: Option<String>,
}

impl SwapRequest {
    /// 交换执行前的报价使用相同参数
    pub fn to_quote_request(&self) -> QuoteRequest {
        QuoteRequest {
            amount: self.amount.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            sender: Some(self.sender.clone()),
            slippage: self.slippage,
            deadline: self.deadline,
            max_hops: self.max_hops,
            excluded: self.excluded.clone(),
        }
    }
}

/// 交换执行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    pub quote: serde_json::Value,
    pub transaction: serde_json::Value,
    pub success: bool,
    pub message: String,
}

/// `GET /tokens` 的查询参数
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub find: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl SearchOptions {
    pub fn find(text: impl Into<String>) -> Self {
        Self {
            find: Some(text.into()),
            ..Default::default()
        }
    }
}

/// `GET /tokens/category/:category` 的查询参数
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// 上游错误响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}

fn decimals_from_text_or_number<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u8),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Number(i64),
    Text(String),
}

impl IntOrText {
    fn into_int<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

/// 分页参数既可以是数字也可以是数字字符串
pub(crate) fn int_from_text_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    IntOrText::deserialize(deserializer)?.into_int()
}

pub(crate) fn optional_int_from_text_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntOrText>::deserialize(deserializer)?
        .map(IntOrText::into_int)
        .transpose()
}
