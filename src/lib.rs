//! chongzhi.pro 充值接口客户端
//!
//! 提供：
//! - [`RechargeClient`]：获取 Session、验证卡密、复用记录、首次充值、更新 Token，
//!   以及串联这些步骤的 [`RechargeClient::run_full_workflow`]
//! - [`ErrorTranslator`]：把上游报错转换为面向用户的中文提示
//!
//! # 示例
//!
//! ```no_run
//! use chongzhi_recharge::{ActivationCode, ClientConfig, RechargeClient};
//!
//! # async fn run() -> chongzhi_recharge::Result<()> {
//! let client = RechargeClient::new(ClientConfig::default())?;
//! let code = ActivationCode::new("CARD-XXXX-XXXX-XXXX");
//! let outcome = client
//!     .run_full_workflow(&code, Some(r#"{"access_token":"..."}"#))
//!     .await;
//! if let Some(step) = outcome.failed_step() {
//!     println!("流程停在 {}", step.step);
//! }
//! # Ok(())
//! # }
//! ```

// 证书校验开关等 TLS 相关配置依赖 reqwest 的 TLS 后端
#[cfg(not(any(feature = "rustls", feature = "native-tls")))]
compile_error!("必须启用 `rustls` 或 `native-tls` feature 之一");

mod client;
mod config;
mod error;
mod error_mapping;
mod http_client;
mod session;
mod traits;
mod types;

// Re-export 公共类型
pub use client::{DECISION_ERROR, RechargeClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use error::{ClientError, Result, TransportError};
pub use error_mapping::{ErrorDomain, ErrorTranslator, MappingTable};
pub use http_client::{HttpUtils, ReqwestTransport};
pub use session::{find_session, parse_session_cookie};
pub use traits::{HttpMethod, HttpTransport, TransportRequest, TransportResponse};
pub use types::{
    ActivationCode, ApiResult, FailureKind, SESSION_COOKIE_NAME, Session, StepDetail, StepName,
    WorkflowOutcome, WorkflowStage, WorkflowStep,
};
