//! 错误类型定义

use std::path::PathBuf;

use thiserror::Error;

/// 客户端错误
///
/// 只覆盖"调用方必须处理"的情况：配置错误和 Session 获取失败。
/// 业务失败、HTTP 失败、解析失败都以 [`crate::ApiResult`] 的形式返回。
#[derive(Debug, Error)]
pub enum ClientError {
    /// 基础 URL 无法解析或缺少主机名
    #[error("无效的基础 URL '{url}': {detail}")]
    InvalidBaseUrl { url: String, detail: String },

    /// HTTP 客户端构建失败（TLS 后端初始化等）
    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClientBuild(String),

    /// 无法获取 Session
    #[error("获取Session失败: {reason}")]
    SessionUnavailable { reason: String },

    /// 配置文件读取失败
    #[error("读取配置文件 {} 失败: {detail}", .path.display())]
    ConfigRead { path: PathBuf, detail: String },

    /// 配置解析失败
    #[error("配置解析失败: {0}")]
    ConfigParse(String),
}

impl ClientError {
    pub(crate) fn session_unavailable(reason: impl Into<String>) -> Self {
        Self::SessionUnavailable {
            reason: reason.into(),
        }
    }
}

/// 传输层错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("请求超时")]
    Timeout,

    #[error("连接错误: {0}")]
    Connect(String),

    #[error("请求失败: {0}")]
    Request(String),

    #[error("读取响应失败: {0}")]
    Body(String),
}

/// 客户端 Result 类型别名
pub type Result<T> = std::result::Result<T, ClientError>;
