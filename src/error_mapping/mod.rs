//! 上游错误信息映射
//!
//! 把技术性错误（原始报错文本、HTTP 状态码）转换为面向用户的中文提示。
//!
//! 匹配顺序：
//! 1. 精确匹配
//! 2. 忽略大小写的包含匹配，按表内顺序，第一个命中者生效
//! 3. 都未命中时原样返回
//!
//! 包含匹配依赖表内顺序。例如 OpenAI 表中的 `"0"` 排在各状态码之前，
//! 所以 `"HTTP错误: 500"` 会命中 `"0"` 而不是 `"500"`；需要状态码提示时
//! 应使用 [`ErrorTranslator::map_http_status`]。

mod openai;
mod revenuecat;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ApiResult;

/// 错误来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDomain {
    #[serde(alias = "revenucat")]
    RevenueCat,
    OpenAi,
}

impl ErrorDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RevenueCat => "revenuecat",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "revenuecat" | "revenucat" => Ok(Self::RevenueCat),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("未知的错误来源: {other}")),
        }
    }
}

/// 一个来源的映射表：`(匹配文本, 提示信息)`，顺序有意义
pub type MappingTable = Vec<(String, String)>;

/// 错误信息翻译器
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    revenuecat: MappingTable,
    openai: MappingTable,
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ErrorTranslator {
    /// 使用自定义映射表
    pub fn new(revenuecat: MappingTable, openai: MappingTable) -> Self {
        Self { revenuecat, openai }
    }

    /// 内置映射表
    pub fn builtin() -> Self {
        Self::new(to_table(revenuecat::MAPPINGS), to_table(openai::MAPPINGS))
    }

    pub fn table(&self, domain: ErrorDomain) -> &[(String, String)] {
        match domain {
            ErrorDomain::RevenueCat => &self.revenuecat,
            ErrorDomain::OpenAi => &self.openai,
        }
    }

    /// 翻译原始错误信息，未命中时原样返回
    pub fn translate(&self, domain: ErrorDomain, raw: &str) -> String {
        self.lookup(domain, raw)
            .map_or_else(|| raw.to_string(), str::to_string)
    }

    /// 按字符串指定来源翻译；来源未知时原样返回
    pub fn translate_str(&self, domain: &str, raw: &str) -> String {
        match domain.parse::<ErrorDomain>() {
            Ok(domain) => self.translate(domain, raw),
            Err(e) => {
                log::debug!("{e}");
                raw.to_string()
            }
        }
    }

    /// 查找映射，未命中返回 `None`
    pub fn lookup(&self, domain: ErrorDomain, raw: &str) -> Option<&str> {
        let table = self.table(domain);

        if let Some((_, message)) = table.iter().find(|(key, _)| key == raw) {
            return Some(message.as_str());
        }

        let raw_lower = raw.to_lowercase();
        table
            .iter()
            .find(|(key, _)| raw_lower.contains(&key.to_lowercase()))
            .map(|(_, message)| message.as_str())
    }

    /// 按 HTTP 状态码给出提示
    pub fn map_http_status(&self, domain: ErrorDomain, status: u16) -> String {
        let code = status.to_string();
        if let Some((_, message)) = self.table(domain).iter().find(|(key, _)| *key == code) {
            return message.clone();
        }

        if status >= 500 {
            format!("服务器内部错误 ({status})，请稍后重试")
        } else if status >= 400 {
            format!("请求错误 ({status})，请检查输入信息")
        } else {
            format!("HTTP错误: {status}")
        }
    }
}

fn to_table(entries: &[(&str, &str)]) -> MappingTable {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl ApiResult {
    /// 面向用户的错误提示，成功时为 `None`
    ///
    /// 有错误文本时翻译错误文本，否则按 HTTP 状态码给出提示。
    pub fn friendly_error(
        &self,
        translator: &ErrorTranslator,
        domain: ErrorDomain,
    ) -> Option<String> {
        if self.success {
            return None;
        }
        Some(match &self.error {
            Some(error) => translator.translate(domain, error),
            None => translator.map_http_status(domain, self.http_status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> ErrorTranslator {
        ErrorTranslator::builtin()
    }

    #[test]
    fn test_exact_status_code() {
        assert_eq!(
            translator().translate(ErrorDomain::OpenAi, "401"),
            "OpenAI认证失败，请重新获取Token"
        );
        assert_eq!(
            translator().translate(ErrorDomain::RevenueCat, "401"),
            "RevenueCat认证失败，请稍后重试"
        );
    }

    #[test]
    fn test_unknown_text_unchanged() {
        let raw = "something entirely different";
        assert_eq!(translator().translate(ErrorDomain::OpenAi, raw), raw);
        assert_eq!(translator().translate_str("openai", raw), raw);
    }

    #[test]
    fn test_substring_case_insensitive() {
        assert_eq!(
            translator().translate(ErrorDomain::OpenAi, "error: TOKEN EXPIRED at 12:00"),
            "Token已过期，请重新获取Token"
        );
    }

    #[test]
    fn test_first_match_wins() {
        // 较长的 OpenSSL 报错在表中靠前
        let raw = "curl: OpenSSL SSL_connect: SSL_ERROR_SYSCALL in connection to api.openai.com:443";
        assert_eq!(
            translator().translate(ErrorDomain::OpenAi, raw),
            "网络连接不稳定，请等几秒钟重试，不要换卡密。如仍失败请联系客服"
        );
        assert_eq!(
            translator().translate(ErrorDomain::OpenAi, "recv: SSL_ERROR_SYSCALL"),
            "网络连接异常，请检查网络后重试"
        );
        // "Invalid receipt" 排在 "Invalid receipt data" 之前
        assert_eq!(
            translator().translate(ErrorDomain::RevenueCat, "Invalid receipt data: x"),
            "收据格式无效，请重新获取收据数据"
        );
        // 精确匹配优先于包含匹配
        assert_eq!(
            translator().translate(ErrorDomain::RevenueCat, "Invalid receipt data"),
            "收据数据无效，请确认收据完整性"
        );
    }

    #[test]
    fn test_zero_entry_precedence() {
        assert_eq!(
            translator().translate(ErrorDomain::OpenAi, "HTTP错误: 500"),
            translator().translate(ErrorDomain::OpenAi, "0")
        );
    }

    #[test]
    fn test_domain_parsing() {
        assert_eq!("openai".parse::<ErrorDomain>(), Ok(ErrorDomain::OpenAi));
        assert_eq!("RevenueCat".parse::<ErrorDomain>(), Ok(ErrorDomain::RevenueCat));
        assert_eq!("revenucat".parse::<ErrorDomain>(), Ok(ErrorDomain::RevenueCat));
        assert!("stripe".parse::<ErrorDomain>().is_err());
        assert_eq!(translator().translate_str("stripe", "401"), "401");
        assert_eq!(
            translator().translate_str("revenucat", "429"),
            "RevenueCat请求过于频繁，请稍后重试"
        );
    }

    #[test]
    fn test_map_http_status() {
        let t = translator();
        assert_eq!(
            t.map_http_status(ErrorDomain::OpenAi, 422),
            "OpenAI数据验证失败，请检查账户信息"
        );
        assert_eq!(
            t.map_http_status(ErrorDomain::RevenueCat, 507),
            "服务器内部错误 (507)，请稍后重试"
        );
        assert_eq!(
            t.map_http_status(ErrorDomain::RevenueCat, 418),
            "请求错误 (418)，请检查输入信息"
        );
        assert_eq!(t.map_http_status(ErrorDomain::OpenAi, 302), "HTTP错误: 302");
    }

    #[test]
    fn test_custom_tables() {
        let t = ErrorTranslator::new(
            vec![],
            vec![("quota".to_string(), "额度不足".to_string())],
        );
        assert_eq!(t.translate(ErrorDomain::OpenAi, "Quota gone"), "额度不足");
        assert_eq!(t.translate(ErrorDomain::RevenueCat, "Quota gone"), "Quota gone");
    }

    #[test]
    fn test_friendly_error() {
        let t = translator();
        let empty = ApiResult::from_json_object(serde_json::Map::new(), 200);
        assert!(!empty.success);
        assert_eq!(
            empty.friendly_error(&t, ErrorDomain::OpenAi),
            Some("HTTP错误: 200".to_string())
        );

        let timeout = ApiResult::failure("请求超时", 0);
        assert_eq!(
            timeout.friendly_error(&t, ErrorDomain::OpenAi).as_deref(),
            Some("请求超时")
        );

        let business = ApiResult::failure("Account suspended by admin", 200);
        assert_eq!(
            business.friendly_error(&t, ErrorDomain::OpenAi).as_deref(),
            Some("账户已被暂停，请联系OpenAI客服")
        );

        let mut object = serde_json::Map::new();
        object.insert("success".into(), serde_json::Value::Bool(false));
        object.insert("error".into(), serde_json::Value::Null);
        object.insert("message".into(), "卡密不存在".into());
        let null_error = ApiResult::from_json_object(object, 200);
        assert_eq!(
            null_error.friendly_error(&t, ErrorDomain::OpenAi).as_deref(),
            Some("卡密不存在")
        );
    }
}
