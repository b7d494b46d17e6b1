//! Session Cookie 解析
//!
//! 语法：`ios_gpt_session=VALUE`，`VALUE` 到下一个 `;` 或字符串结尾为止。
//! Cookie 名必须位于开头，或紧跟在 `;`、`,`、空白之后，
//! 因此 `xios_gpt_session=...` 不会被误认。VALUE 去掉首尾空白后不能为空。

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Session;

#[allow(clippy::unwrap_used)]
static SESSION_COOKIE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[;,\s])ios_gpt_session=([^;]*)").unwrap()
});

/// 从单个 `Set-Cookie`（或 `Cookie`）头中提取 session 值
pub fn parse_session_cookie(header: &str) -> Option<&str> {
    SESSION_COOKIE_PATTERN
        .captures_iter(header)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|value| !value.is_empty())
}

/// 依次检查多个 `Set-Cookie` 头，返回第一个有效的 session
pub fn find_session<'a, I>(headers: I) -> Option<Session>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .find_map(parse_session_cookie)
        .map(Session::new)
}
