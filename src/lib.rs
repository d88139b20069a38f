//! Monorail DEX 聚合器的 MCP / HTTP 服务
//!
//! 核心流程：输入校验 → 代币解析 → 报价 / 交换，
//! 上游为 Monorail Data API 和 Quote API（pathfinder）。

pub mod clients;
pub mod config;
pub mod data_api;
pub mod error;
pub mod http_api;
pub mod logging;
pub mod quote_api;
pub mod server;
pub mod token_resolver;
pub mod tools;
pub mod types;
pub mod validators;

mod upstream;

pub use clients::MonorailClients;
pub use config::Config;
pub use error::{ErrorKind, MonorailError};
pub use server::MonorailServer;
