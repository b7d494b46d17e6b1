//! 公共类型定义

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Session / 卡密 ============

/// 上游会话 Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "ios_gpt_session";

/// 一次流程使用的上游 Session（`ios_gpt_session` Cookie 值）
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(String);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Cookie` 请求头的值
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.0)
    }

    /// 日志用的截断形式
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{prefix}***")
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Session").field(&self.masked()).finish()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 卡密格式：可选字母前缀，后跟 3 或 4 段 4 位字母数字
#[allow(clippy::unwrap_used)]
static ACTIVATION_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[A-Z]+-)?[A-Z0-9]{4}(?:-[A-Z0-9]{4}){2,3}$").unwrap()
});

/// 用户输入的卡密
///
/// 原样保存并原样提交，不去空白、不校验格式；清洗输入由调用方负责。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否符合常见卡密格式（如 `QWER-XDKO-DWJN-R21Q`、`CARD-QWER-XDKO-DWJN`）
    ///
    /// 仅供调用方提前提示用户，流程本身不以此拦截请求。
    pub fn is_well_formed(&self) -> bool {
        ACTIVATION_CODE_PATTERN.is_match(&self.0)
    }
}

impl From<&str> for ActivationCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActivationCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============ 接口结果 ============

/// 失败分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 获取 Session 失败
    SessionUnavailable,
    /// 网络/TLS/超时，`http_code` 为 0
    Transport,
    /// 非 200/201 状态码
    HttpStatus,
    /// 响应不是合法的 JSON 对象
    Decode,
    /// 上游返回 `success: false`
    Business,
    /// 卡密状态既不是 used 也不是可用的 active
    WorkflowDecision,
}

/// 单次接口调用的归一化结果
///
/// 序列化字段名与上游保持一致（`http_code`、`raw_response`），
/// 上游返回的其他顶层字段原样保存在 `extra` 中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "http_code")]
    pub http_status: u16,
    #[serde(rename = "raw_response", default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResult {
    /// 构造失败结果（传输失败时 `http_status` 为 0）
    pub fn failure(error: impl Into<String>, http_status: u16) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            http_status,
            raw_body: None,
            extra: Map::new(),
        }
    }

    /// 构造 JSON 解析失败的结果，保留原始响应
    pub fn decode_failure(
        error: impl Into<String>,
        raw_body: impl Into<String>,
        http_status: u16,
    ) -> Self {
        Self {
            raw_body: Some(raw_body.into()),
            ..Self::failure(error, http_status)
        }
    }

    /// 从上游返回的 JSON 对象构造结果
    ///
    /// `success` 缺失或非布尔时视为失败；成功时丢弃 `error` 字段。
    /// 失败时优先取非 null 的 `error`，其次取 `message`。
    pub fn from_json_object(mut object: Map<String, Value>, http_status: u16) -> Self {
        let success = object
            .remove("success")
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let data = object.remove("data").filter(|v| !v.is_null());
        object.remove("http_code");

        let error = if success {
            object.remove("error");
            None
        } else {
            object
                .remove("error")
                .filter(|v| !v.is_null())
                .or_else(|| object.get("message").cloned())
                .and_then(|v| match v {
                    Value::Null => None,
                    Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                })
        };

        Self {
            success,
            data,
            error,
            http_status,
            raw_body: None,
            extra: object,
        }
    }

    /// `data.code_status` 字段
    pub fn code_status(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.get("code_status"))
            .and_then(Value::as_str)
    }

    /// 顶层 `message` 字段（上游的提示文本）
    pub fn message(&self) -> Option<&str> {
        self.extra.get("message").and_then(Value::as_str)
    }

    /// 失败分类，成功时为 `None`
    pub fn failure_kind(&self) -> Option<FailureKind> {
        if self.success {
            return None;
        }
        Some(if self.raw_body.is_some() {
            FailureKind::Decode
        } else if self.http_status == 0 {
            FailureKind::Transport
        } else if !matches!(self.http_status, 200 | 201) {
            FailureKind::HttpStatus
        } else {
            FailureKind::Business
        })
    }
}

// ============ 流程记录 ============

/// 流程步骤名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    GetSession,
    VerifyCode,
    ReuseRecord,
    SubmitRecharge,
    Decision,
}

impl StepName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetSession => "get_session",
            Self::VerifyCode => "verify_code",
            Self::ReuseRecord => "reuse_record",
            Self::SubmitRecharge => "submit_recharge",
            Self::Decision => "decision",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 步骤详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDetail {
    Session(Session),
    Result(ApiResult),
    Error(String),
}

/// 流程中的一步
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub step: StepName,
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(flatten)]
    pub detail: StepDetail,
}

impl WorkflowStep {
    pub(crate) fn session(session: &Session) -> Self {
        Self {
            step: StepName::GetSession,
            succeeded: true,
            detail: StepDetail::Session(session.clone()),
        }
    }

    pub(crate) fn result(step: StepName, result: &ApiResult) -> Self {
        Self {
            step,
            succeeded: result.success,
            detail: StepDetail::Result(result.clone()),
        }
    }

    pub(crate) fn failed(step: StepName, error: impl Into<String>) -> Self {
        Self {
            step,
            succeeded: false,
            detail: StepDetail::Error(error.into()),
        }
    }

    /// 该步骤的失败分类，成功时为 `None`
    pub fn failure_kind(&self) -> Option<FailureKind> {
        if self.succeeded {
            return None;
        }
        match (&self.detail, self.step) {
            (StepDetail::Result(result), _) => result.failure_kind(),
            (_, StepName::GetSession) => Some(FailureKind::SessionUnavailable),
            _ => Some(FailureKind::WorkflowDecision),
        }
    }
}

/// 流程到达的阶段
///
/// `Started → SessionAcquired → CodeVerified → {Reused | Recharged | Rejected}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    #[default]
    Started,
    SessionAcquired,
    CodeVerified,
    Reused,
    Recharged,
    Rejected,
}

/// 完整充值流程的结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowOutcome {
    pub success: bool,
    pub steps: Vec<WorkflowStep>,
    pub final_result: Option<ApiResult>,
    pub stage: WorkflowStage,
}

impl WorkflowOutcome {
    /// 第一个失败的步骤（流程停止的位置）
    pub fn failed_step(&self) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| !s.succeeded)
    }

    pub(crate) fn push(&mut self, step: WorkflowStep) {
        log::info!(
            "[workflow] step {} -> {}",
            step.step,
            if step.succeeded { "ok" } else { "failed" }
        );
        self.steps.push(step);
    }

    pub(crate) fn finish(&mut self, stage: WorkflowStage, result: ApiResult) {
        self.stage = stage;
        self.success = result.success;
        self.final_result = Some(result);
    }
}
