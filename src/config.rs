//! 客户端配置
//!
//! 配置在构造时传入，之后不可变。可直接构造、使用 `with_*` 方法调整，
//! 或从 TOML 加载：
//!
//! ```toml
//! base_url = "https://chongzhi.pro"
//! timeout_secs = 30
//! accept_invalid_certs = false
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// 默认服务地址
pub const DEFAULT_BASE_URL: &str = "https://chongzhi.pro";

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 默认 User-Agent（iOS Safari）
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Mobile/15E148 Safari/604.1";

/// 充值客户端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 服务根地址，不带末尾 `/`
    pub base_url: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
    pub user_agent: String,
    /// 跳过 TLS 证书校验。仅用于调试，开启时会输出警告
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    /// 使用指定服务地址，其余取默认值
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 从 TOML 文本解析配置，缺省字段取默认值
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ClientError::ConfigParse(e.to_string()))?;
        Ok(config.normalized())
    }

    /// 从 TOML 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ClientError::ConfigRead {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        log::debug!("加载配置文件: {}", path.display());
        Self::from_toml_str(&text)
    }

    /// 结构体字面量构造的配置也要去掉末尾 `/`
    pub(crate) fn normalized(mut self) -> Self {
        let base_url = std::mem::take(&mut self.base_url);
        self.with_base_url(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://chongzhi.pro");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.contains("iPhone"));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ClientConfig::new("http://127.0.0.1:8080/")
            .with_timeout_secs(5)
            .with_user_agent("test-agent");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://example.test/"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = ClientConfig::from_toml_str("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ClientError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load("/nonexistent/chongzhi.toml").unwrap_err();
        assert!(matches!(err, ClientError::ConfigRead { .. }));
    }
}
