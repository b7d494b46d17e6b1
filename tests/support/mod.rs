//! 测试用脚本化传输

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chongzhi_recharge::{
    ClientConfig, HttpTransport, RechargeClient, TransportError, TransportRequest,
    TransportResponse,
};
use serde_json::Value;

pub const BASE_URL: &str = "https://chongzhi.test";

/// 按顺序返回预设响应，并记录收到的请求
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: Result<TransportResponse, TransportError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// 首页响应，带 session Cookie
    pub fn session(&self, token: &str) -> &Self {
        self.push(Ok(TransportResponse {
            status: 200,
            body: "<html></html>".to_string(),
            content_type: Some("text/html".to_string()),
            set_cookies: vec![
                "PHPSESSID=ignored; path=/".to_string(),
                format!("ios_gpt_session={token}; path=/; HttpOnly"),
            ],
        }))
    }

    pub fn json(&self, status: u16, body: &Value) -> &Self {
        self.raw(status, &body.to_string())
    }

    pub fn raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(TransportResponse {
            status,
            body: body.to_string(),
            content_type: Some("application/json".to_string()),
            set_cookies: Vec::new(),
        }))
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 收到的请求路径（去掉 BASE_URL）
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.url.trim_start_matches(BASE_URL).to_string())
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn request(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
    }
}

pub fn client(transport: &Arc<ScriptedTransport>) -> RechargeClient {
    RechargeClient::with_transport(ClientConfig::new(BASE_URL), transport.clone()).unwrap()
}
