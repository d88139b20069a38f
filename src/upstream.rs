use crate::error::{classify, Failure, Result};
use crate::types::ErrorResponse;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// 发送一次请求并解码 JSON 响应
///
/// 只做一次往返，不重试。非 2xx 响应会读取 `{ "message": ... }` 后按状态码归类。
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await.map_err(classify)?;
    let status = response.status();

    debug!(url = %response.url(), status = %status, "收到上游响应");

    if !status.is_success() {
        let message = error_message(status, response.text().await);
        return Err(classify(Failure::Status { status, message }));
    }

    response.json::<T>().await.map_err(classify)
}

/// 从错误响应体中取出 `message`；读取失败只记录日志
fn error_message(status: StatusCode, body: reqwest::Result<String>) -> Option<String> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            debug!(status = %status, error = %e, "读取上游错误响应体失败");
            return None;
        }
    };

    serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
}

/// 去掉 base URL 末尾的 `/`
pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
