//! 通用 HTTP 客户端工具
//!
//! - [`ReqwestTransport`]：基于 reqwest 的默认传输实现
//! - [`HttpUtils`]：把传输层结果归一化为 [`ApiResult`]

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, SET_COOKIE};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, TransportError};
use crate::traits::{HttpMethod, HttpTransport, TransportRequest, TransportResponse};
use crate::types::ApiResult;

/// 基于 reqwest 的传输实现
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 按配置构建（超时、User-Agent、TLS 校验）
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            log::warn!(
                "TLS 证书校验已关闭 (accept_invalid_certs = true)，仅应在调试环境使用"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// 使用外部构建好的 reqwest 客户端
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.json_body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        Ok(TransportResponse {
            status,
            body,
            content_type,
            set_cookies,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// 执行请求并归一化为 [`ApiResult`]，不会返回错误
    ///
    /// # Arguments
    /// * `transport` - 传输实现
    /// * `request` - 已构造好的请求（URL、headers、body）
    /// * `action` - 接口名（用于日志）
    pub async fn execute(
        transport: &dyn HttpTransport,
        request: TransportRequest,
        action: &str,
    ) -> ApiResult {
        log::debug!("[{}] {} {}", action, request.method.as_str(), request.url);

        match transport.request(request).await {
            Ok(response) => {
                log::debug!("[{}] Response Status: {}", action, response.status);
                log::debug!("[{}] Response Body: {}", action, response.body);
                Self::normalize(response.status, &response.body, action)
            }
            Err(e) => {
                log::error!("[{}] 请求失败: {}", action, e);
                Self::transport_failure(&e)
            }
        }
    }

    /// 传输失败 -> `http_code` 为 0 的失败结果
    pub fn transport_failure(error: &TransportError) -> ApiResult {
        let message = match error {
            TransportError::Body(_) => format!("请求失败: {error}"),
            _ => error.to_string(),
        };
        ApiResult::failure(message, 0)
    }

    /// 按状态码和响应体构造结果
    ///
    /// 状态码不是 200/201 时不解析响应体；
    /// 响应体不是 JSON 对象时保留原始文本到 `raw_body`。
    pub fn normalize(status: u16, body: &str, action: &str) -> ApiResult {
        if !matches!(status, 200 | 201) {
            return ApiResult::failure(format!("HTTP错误: {status}"), status);
        }

        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => ApiResult::from_json_object(object, status),
            Ok(other) => {
                log::error!("[{}] 响应不是 JSON 对象: {}", action, other);
                ApiResult::decode_failure("JSON解析失败: 响应不是 JSON 对象", body, status)
            }
            Err(e) => {
                log::error!("[{}] JSON 解析失败: {}", action, e);
                log::error!("[{}] 原始响应: {}", action, body);
                ApiResult::decode_failure(format!("JSON解析失败: {e}"), body, status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FailureKind;

    #[test]
    fn test_normalize_success_adds_status() {
        let result = HttpUtils::normalize(
            201,
            r#"{"success":true,"data":{"code_status":"active"}}"#,
            "verify",
        );
        assert!(result.success);
        assert_eq!(result.http_status, 201);
        assert_eq!(result.code_status(), Some("active"));
        assert_eq!(result.raw_body, None);
    }

    #[test]
    fn test_normalize_http_error() {
        let result = HttpUtils::normalize(500, "{\"success\":true}", "verify");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("HTTP错误: 500"));
        assert_eq!(result.http_status, 500);
        assert_eq!(result.failure_kind(), Some(FailureKind::HttpStatus));
    }

    #[test]
    fn test_normalize_invalid_json_keeps_raw_body() {
        let body = "<html>502 Bad Gateway</html>";
        let result = HttpUtils::normalize(200, body, "verify");
        assert!(!result.success);
        assert_eq!(result.raw_body.as_deref(), Some(body));
        assert_eq!(result.http_status, 200);
        assert!(result.error.unwrap().starts_with("JSON解析失败"));
    }

    #[test]
    fn test_normalize_non_object_json() {
        let result = HttpUtils::normalize(200, "[1,2,3]", "verify");
        assert_eq!(result.failure_kind(), Some(FailureKind::Decode));
        assert_eq!(result.raw_body.as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_transport_failure_messages() {
        let timeout = HttpUtils::transport_failure(&TransportError::Timeout);
        assert_eq!(timeout.error.as_deref(), Some("请求超时"));
        assert_eq!(timeout.http_status, 0);

        let connect = HttpUtils::transport_failure(&TransportError::Connect("refused".into()));
        assert_eq!(connect.error.as_deref(), Some("连接错误: refused"));
        assert_eq!(connect.failure_kind(), Some(FailureKind::Transport));

        let body = HttpUtils::transport_failure(&TransportError::Body("eof".into()));
        assert_eq!(body.error.as_deref(), Some("请求失败: 读取响应失败: eof"));
    }

    #[test]
    fn test_build_transport_from_config() {
        let config = ClientConfig::default().with_timeout_secs(3);
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[test]
    fn test_build_transport_accepting_invalid_certs() {
        let config = ClientConfig::default().with_accept_invalid_certs(true);
        assert!(ReqwestTransport::new(&config).is_ok());
    }
}
