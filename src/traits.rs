//! HTTP 传输抽象 Trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// 请求方法（上游只用到 GET 和 POST）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// 传输层请求
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON 请求体，`None` 表示无请求体
    pub json_body: Option<Value>,
}

impl TransportRequest {
    /// 按名称（忽略大小写）查找请求头
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// 传输层响应
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
    /// 所有 `Set-Cookie` 响应头，按出现顺序
    pub set_cookies: Vec<String>,
}

/// JSON-over-HTTPS 传输
///
/// 实现:
/// - `ReqwestTransport`（默认，基于 reqwest）
/// - 测试中的脚本化传输
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发送一次请求并读取完整响应体
    ///
    /// 任何 HTTP 状态码都属于正常返回；只有网络、TLS、超时等失败才返回 `Err`。
    async fn request(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError>;
}
