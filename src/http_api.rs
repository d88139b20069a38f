//! HTTP 入口
//!
//! 与 MCP 工具一一对应的 REST 路由。成功响应为 `{success: true, data, ...}`，
//! 失败响应为 `{error, message}`：参数形状或校验失败返回 400，其余返回 500。

use crate::{
    clients::MonorailClients,
    data_api::TokenDirectory,
    error::MonorailError,
    tools::{
        quote::check_quote_request,
        swap::check_swap_request,
        token::{check_category_request, DEFAULT_CATEGORY_LIMIT, DEFAULT_CATEGORY_OFFSET},
        GetTokensByCategoryRequest, GetTokensRequest,
    },
    types::{CategoryOptions, QuoteRequest, SwapRequest, TokenCategory},
    validators::{validate_address, validate_pagination},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

/// 失败响应
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiFailure {
    /// 请求形状不合法（JSON 体、查询参数或路径参数无法解析）
    fn invalid(label: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: label,
            message: message.into(),
        }
    }

    /// 领域错误：校验失败为 400，其余为 500
    fn domain(label: &'static str, err: MonorailError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error!(error = %err, kind = ?err.kind(), status = %status, "{}", label);
        Self {
            status,
            error: label,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.error, "message": self.message })),
        )
            .into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiFailure>;

/// 分类查询的查询参数（分类来自路径）
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    address: Option<String>,
    offset: Option<i64>,
    limit: Option<i64>,
}

/// 构建 HTTP 路由
pub fn router(clients: MonorailClients) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/tokens", get(list_tokens))
        .route("/api/tokens/count", get(token_count))
        .route("/api/tokens/category/{category}", get(tokens_by_category))
        .route("/api/tokens/{address}", get(token_by_address))
        .route("/api/wallet/{address}/balances", get(wallet_balances))
        .route("/api/quote", post(quote))
        .route("/api/swap", post(swap))
        .fallback(not_found)
        .with_state(clients)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn endpoint_directory() -> Value {
    json!({
        "GET /": "API documentation",
        "GET /health": "Health check",
        "GET /api/tokens": "Get all tokens",
        "GET /api/tokens/category/:category": "Get tokens by category",
        "GET /api/tokens/:address": "Get token by address",
        "GET /api/tokens/count": "Get token count",
        "GET /api/wallet/:address/balances": "Get wallet balances",
        "POST /api/quote": "Get swap quote",
        "POST /api/swap": "Execute swap"
    })
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Monorail DEX API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoint_directory()
    }))
}

async fn health() -> impl IntoResponse {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "available_endpoints": endpoint_directory()
        })),
    )
}

/// GET /api/tokens
async fn list_tokens(
    State(clients): State<MonorailClients>,
    query: Result<Query<GetTokensRequest>, QueryRejection>,
) -> ApiResult {
    const LABEL: &str = "Failed to fetch tokens";

    let Query(request) = query.map_err(|e| ApiFailure::invalid("Invalid parameters", e.body_text()))?;
    validate_pagination(request.offset, request.limit).map_err(|e| ApiFailure::domain(LABEL, e))?;

    let tokens = clients
        .directory
        .get_tokens(&request.into())
        .await
        .map_err(|e| ApiFailure::domain(LABEL, e))?;

    Ok(Json(json!({
        "success": true,
        "count": tokens.len(),
        "data": tokens
    })))
}

/// GET /api/tokens/category/{category}
async fn tokens_by_category(
    State(clients): State<MonorailClients>,
    category: Result<Path<TokenCategory>, PathRejection>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> ApiResult {
    const LABEL: &str = "Failed to fetch tokens by category";

    let Path(category) =
        category.map_err(|e| ApiFailure::invalid("Invalid parameters", e.body_text()))?;
    let Query(query) = query.map_err(|e| ApiFailure::invalid("Invalid parameters", e.body_text()))?;

    let request = GetTokensByCategoryRequest {
        category,
        address: query.address.filter(|a| !a.is_empty()),
        offset: query.offset.unwrap_or(DEFAULT_CATEGORY_OFFSET),
        limit: query.limit.unwrap_or(DEFAULT_CATEGORY_LIMIT),
    };
    check_category_request(&request).map_err(|e| ApiFailure::domain(LABEL, e))?;

    let options = CategoryOptions {
        address: request.address,
        offset: Some(request.offset),
        limit: Some(request.limit),
    };
    let tokens = clients
        .directory
        .get_tokens_by_category(category, &options)
        .await
        .map_err(|e| ApiFailure::domain(LABEL, e))?;

    Ok(Json(json!({
        "success": true,
        "category": category,
        "count": tokens.len(),
        "data": tokens
    })))
}

/// GET /api/tokens/{address}
async fn token_by_address(
    State(clients): State<MonorailClients>,
    Path(address): Path<String>,
) -> ApiResult {
    const LABEL: &str = "Failed to fetch token";

    validate_address(&address, "contractAddress").map_err(|e| ApiFailure::domain(LABEL, e))?;
    let token = clients
        .directory
        .get_token(&address)
        .await
        .map_err(|e| ApiFailure::domain(LABEL, e))?;

    Ok(Json(json!({ "success": true, "data": token })))
}

/// GET /api/tokens/count
async fn token_count(State(clients): State<MonorailClients>) -> ApiResult {
    let count = clients
        .directory
        .get_token_count()
        .await
        .map_err(|e| ApiFailure::domain("Failed to fetch token count", e))?;

    Ok(Json(json!({
        "success": true,
        "data": { "count": count },
        "total_tokens": count
    })))
}

/// GET /api/wallet/{address}/balances
async fn wallet_balances(
    State(clients): State<MonorailClients>,
    Path(address): Path<String>,
) -> ApiResult {
    const LABEL: &str = "Failed to fetch wallet balances";

    validate_address(&address, "address").map_err(|e| ApiFailure::domain(LABEL, e))?;
    let balances = clients
        .directory
        .get_wallet_balances(&address)
        .await
        .map_err(|e| ApiFailure::domain(LABEL, e))?;

    Ok(Json(json!({
        "success": true,
        "wallet": address,
        "balances_count": balances.len(),
        "data": balances
    })))
}

/// POST /api/quote
async fn quote(
    State(clients): State<MonorailClients>,
    body: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApiResult {
    const LABEL: &str = "Failed to get quote";

    let Json(request) =
        body.map_err(|e| ApiFailure::invalid("Invalid quote parameters", e.body_text()))?;
    check_quote_request(&request).map_err(|e| ApiFailure::domain(LABEL, e))?;

    let quote = clients
        .quote_api
        .get_quote(&request)
        .await
        .map_err(|e| ApiFailure::domain(LABEL, e))?;

    Ok(Json(json!({
        "success": true,
        "data": quote,
        "quote_for": {
            "amount": request.amount,
            "from": request.from,
            "to": request.to
        }
    })))
}

/// POST /api/swap
async fn swap(
    State(clients): State<MonorailClients>,
    body: Result<Json<SwapRequest>, JsonRejection>,
) -> ApiResult {
    const LABEL: &str = "Failed to execute swap";

    let Json(request) =
        body.map_err(|e| ApiFailure::invalid("Invalid swap parameters", e.body_text()))?;
    check_swap_request(&request).map_err(|e| ApiFailure::domain(LABEL, e))?;

    let result = clients
        .quote_api
        .execute_swap(&request)
        .await
        .map_err(|e| ApiFailure::domain(LABEL, e))?;

    Ok(Json(json!({
        "success": true,
        "data": result,
        "swap_executed": {
            "amount": request.amount,
            "from": request.from,
            "to": request.to,
            "sender": request.sender
        }
    })))
}
