//! chongzhi.pro 充值客户端

mod api;
mod http;
mod workflow;

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http_client::ReqwestTransport;
use crate::traits::HttpTransport;

pub use workflow::DECISION_ERROR;

pub(crate) const VERIFY_PATH: &str = "/api-verify.php";
pub(crate) const REUSE_PATH: &str = "/api-recharge-reuse.php";
pub(crate) const SUBMIT_PATH: &str = "/simple-submit-recharge.php";

/// 充值客户端
///
/// 只持有不可变配置和传输实现，可在多个任务间共享；
/// 每次流程之间互不影响。
pub struct RechargeClient {
    pub(crate) config: ClientConfig,
    /// `Host` 头（主机名，非默认端口时带端口）
    pub(crate) host: String,
    pub(crate) transport: Arc<dyn HttpTransport>,
}

impl RechargeClient {
    /// 使用默认 reqwest 传输创建客户端
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// 使用自定义传输创建客户端
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let config = config.normalized();
        let host = host_of(&config.base_url)?;
        log::debug!("RechargeClient 初始化: base_url={}, host={host}", config.base_url);
        Ok(Self {
            config,
            host,
            transport,
        })
    }

    /// 当前配置
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl fmt::Debug for RechargeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RechargeClient")
            .field("config", &self.config)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// 解析基础 URL，返回 `Host` 头的值
fn host_of(base_url: &str) -> Result<String> {
    let invalid = |detail: String| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        detail,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("不支持的协议: {}", url.scheme())));
    }
    let host = url
        .host_str()
        .ok_or_else(|| invalid("缺少主机名".to_string()))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
