//! 充值接口

use serde_json::json;

use crate::error::{ClientError, Result};
use crate::session::find_session;
use crate::traits::{HttpMethod, TransportRequest};
use crate::types::{ActivationCode, ApiResult, Session};

use super::http::{ACCEPT_ANY, ACCEPT_JSON};
use super::{RechargeClient, REUSE_PATH, SUBMIT_PATH, VERIFY_PATH};

impl RechargeClient {
    /// 获取 Session
    ///
    /// 访问首页，从 `Set-Cookie` 中读取 `ios_gpt_session`。
    /// 状态码不是 200、请求失败或响应中没有该 Cookie 时返回
    /// [`ClientError::SessionUnavailable`]。
    pub async fn acquire_session(&self) -> Result<Session> {
        let request = TransportRequest {
            method: HttpMethod::Get,
            url: self.url("/"),
            headers: self.page_headers(),
            json_body: None,
        };
        log::debug!("[get_session] GET {}", request.url);

        let response = self.transport.request(request).await.map_err(|e| {
            log::error!("[get_session] 请求失败: {e}");
            ClientError::session_unavailable(e.to_string())
        })?;

        log::debug!("[get_session] Response Status: {}", response.status);
        if response.status != 200 {
            return Err(ClientError::session_unavailable(format!(
                "HTTP {}",
                response.status
            )));
        }

        let session = find_session(response.set_cookies.iter().map(String::as_str))
            .ok_or_else(|| ClientError::session_unavailable("响应中缺少 ios_gpt_session Cookie"))?;
        log::debug!("[get_session] session={}", session.masked());
        Ok(session)
    }

    /// 验证卡密
    pub async fn verify_activation_code(
        &self,
        session: &Session,
        code: &ActivationCode,
    ) -> ApiResult {
        self.post_json(
            VERIFY_PATH,
            session,
            ACCEPT_JSON,
            json!({ "activation_code": code.as_str() }),
            "verify_code",
        )
        .await
    }

    /// 复用已有充值记录（卡密状态为 `used` 时）
    pub async fn reuse_record(&self, session: &Session) -> ApiResult {
        self.post_json(
            REUSE_PATH,
            session,
            ACCEPT_ANY,
            json!({ "action": "reuse_record" }),
            "reuse_record",
        )
        .await
    }

    /// 首次充值（卡密状态为 `active` 时）
    ///
    /// `user_data` 为用户的 JSON Token，原样转发。
    pub async fn submit_recharge(&self, session: &Session, user_data: &str) -> ApiResult {
        self.post_json(
            SUBMIT_PATH,
            session,
            ACCEPT_JSON,
            json!({ "user_data": user_data }),
            "submit_recharge",
        )
        .await
    }

    /// 更新已用卡密绑定的 Token 并重新充值
    pub async fn update_token_and_recharge(
        &self,
        session: &Session,
        code: &ActivationCode,
        user_data: &str,
    ) -> ApiResult {
        self.post_json(
            REUSE_PATH,
            session,
            ACCEPT_ANY,
            json!({
                "action": "update_token_and_recharge",
                "card_code": code.as_str(),
                "json_data": user_data,
            }),
            "update_token",
        )
        .await
    }
}
