//! 进程内的上游模拟服务（Data API + Quote API）

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use monorail_mcp_server::{config::ApiConfig, MonorailClients};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub const USDC: &str = "0xf817257fed379853cDe0fa4F97AB987181B1E5Ea";
pub const WMON: &str = "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701";
pub const SENDER: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0";
pub const SOURCE_ID: &str = "1300175433951702";

/// 一次上游调用的记录
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
}

/// 模拟服务的行为配置
#[derive(Debug, Clone)]
pub struct MockBehavior {
    pub verified: Vec<Value>,
    pub search: Vec<Value>,
    pub quote_status: StatusCode,
    pub swap_status: StatusCode,
    pub error_message: Option<String>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            verified: vec![token_json("USDC", USDC, "6"), token_json("WMON", WMON, "18")],
            search: vec![],
            quote_status: StatusCode::OK,
            swap_status: StatusCode::OK,
            error_message: None,
        }
    }
}

struct MockState {
    behavior: MockBehavior,
    calls: Mutex<Vec<Recorded>>,
}

pub struct MockUpstream {
    pub data_url: String,
    pub quote_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub async fn spawn(behavior: MockBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            data_url: format!("http://{}/v1", addr),
            quote_url: format!("http://{}/v4", addr),
            state,
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.state.calls.lock().unwrap().clone()
    }

    /// 调用序列，格式为 `METHOD /path`
    pub fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn find_call(&self, path: &str) -> Option<Recorded> {
        self.calls().into_iter().find(|c| c.path == path)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            data_api_url: self.data_url.clone(),
            quote_api_url: self.quote_url.clone(),
            source_id: SOURCE_ID.to_string(),
            native_symbol: "MON".to_string(),
            http_timeout: 5,
        }
    }

    pub fn clients(&self) -> MonorailClients {
        MonorailClients::from_config(&self.api_config()).unwrap()
    }
}

pub fn token_json(symbol: &str, address: &str, decimals: &str) -> Value {
    json!({
        "address": address,
        "name": format!("{} Token", symbol),
        "symbol": symbol,
        "decimals": decimals,
        "categories": ["verified"],
        "id": "1",
        "balance": "0",
        "mon_per_token": "0.5",
        "usd_per_token": "1.0",
        "pconf": "100"
    })
}

fn failure(status: StatusCode, message: &Option<String>) -> Response {
    match message {
        Some(message) => (status, Json(json!({ "message": message }))).into_response(),
        None => status.into_response(),
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    state.calls.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: query.clone(),
    });

    let behavior = &state.behavior;
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["v1", "tokens", "category", "verified"]) => {
            Json(Value::Array(behavior.verified.clone())).into_response()
        }
        ("GET", ["v1", "tokens", "category", _]) => Json(json!([])).into_response(),
        ("GET", ["v1", "tokens", "count"]) => Json(json!(1234)).into_response(),
        ("GET", ["v1", "tokens"]) => Json(Value::Array(behavior.search.clone())).into_response(),
        ("GET", ["v1", "token", address]) => {
            if address.eq_ignore_ascii_case(USDC) {
                Json(json!({
                    "address": USDC,
                    "name": "USD Coin",
                    "symbol": "USDC",
                    "decimals": 6,
                    "categories": ["verified", "stable"]
                }))
                .into_response()
            } else {
                failure(StatusCode::NOT_FOUND, &Some("token not found".to_string()))
            }
        }
        ("GET", ["v1", "wallet", address, "balances"]) => Json(json!([{
            "address": USDC,
            "id": "7",
            "name": "USD Coin",
            "symbol": "USDC",
            "decimals": "6",
            "categories": ["verified"],
            "balance": "12.5",
            "owner": address
        }]))
        .into_response(),
        ("GET", ["v4", "quote"]) => {
            if behavior.quote_status != StatusCode::OK {
                return failure(behavior.quote_status, &behavior.error_message);
            }
            Json(json!({
                "quote_id": "q-1",
                "input": query.get("amount"),
                "output_formatted": "10.5",
                "from": query.get("from"),
                "to": query.get("to"),
                "hops": 1
            }))
            .into_response()
        }
        ("POST", ["v4", "swap"]) => {
            if behavior.swap_status != StatusCode::OK {
                return failure(behavior.swap_status, &behavior.error_message);
            }
            Json(json!({
                "to": "0x525B929fCd6a64AfF834f4eeCc6E860486cED700",
                "data": "0xdeadbeef",
                "value": "1500000000000000000",
                "sender": query.get("sender")
            }))
            .into_response()
        }
        _ => failure(StatusCode::NOT_FOUND, &None),
    }
}
