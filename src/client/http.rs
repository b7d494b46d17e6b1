//! 充值接口请求构造

use serde_json::Value;

use crate::http_client::HttpUtils;
use crate::traits::{HttpMethod, TransportRequest};
use crate::types::{ApiResult, Session};

use super::RechargeClient;

const ACCEPT_LANGUAGE: &str = "zh-CN,zh-Hans;q=0.9";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub(crate) const ACCEPT_JSON: &str = "application/json";
pub(crate) const ACCEPT_ANY: &str = "*/*";

impl RechargeClient {
    /// 首页请求头（模拟浏览器打开页面）
    pub(crate) fn page_headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.config.user_agent.clone()),
            ("Host".to_string(), self.host.clone()),
            ("Accept".to_string(), ACCEPT_HTML.to_string()),
            ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
        ]
    }

    /// 接口请求头（带 Session Cookie）
    pub(crate) fn api_headers(&self, session: &Session, accept: &str) -> Vec<(String, String)> {
        let base = &self.config.base_url;
        vec![
            ("User-Agent".to_string(), self.config.user_agent.clone()),
            ("Accept".to_string(), accept.to_string()),
            ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Origin".to_string(), base.clone()),
            ("Referer".to_string(), format!("{base}/")),
            ("Host".to_string(), self.host.clone()),
            ("Cookie".to_string(), session.cookie_header()),
        ]
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// 执行 POST JSON 请求
    pub(crate) async fn post_json(
        &self,
        path: &str,
        session: &Session,
        accept: &str,
        body: Value,
        action: &str,
    ) -> ApiResult {
        let request = TransportRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers: self.api_headers(session, accept),
            json_body: Some(body),
        };
        log::debug!("[{action}] session={}", session.masked());
        HttpUtils::execute(self.transport.as_ref(), request, action).await
    }
}
