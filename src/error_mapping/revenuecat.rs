//! RevenueCat 错误映射表
//!
//! 顺序有意义：模糊匹配时靠前的条目优先，
//! 较长的 OpenSSL 报错必须排在 `SSL_ERROR_SYSCALL` 之前。

pub(super) const MAPPINGS: &[(&str, &str)] = &[
    // ============ 网络连接错误 ============
    (
        "OpenSSL SSL_connect: SSL_ERROR_SYSCALL in connection to api.revenuecat.com:443",
        "网络连接不稳定，请等几秒钟重试，不要换卡密。如仍失败请联系客服",
    ),
    ("SSL_ERROR_SYSCALL", "网络连接异常，请检查网络后重试"),
    ("Connection timed out", "RevenueCat服务连接超时，请稍后重试"),
    ("Couldn't connect to server", "RevenueCat服务暂时不可用，请稍后重试"),
    ("Failed to connect", "RevenueCat服务连接失败，请检查网络连接"),
    ("Connection refused", "RevenueCat服务拒绝连接，请稍后重试"),
    ("Network is unreachable", "网络不可达，请检查网络设置"),
    ("SSL connect error", "SSL连接错误，请稍后重试"),
    ("Operation timed out", "RevenueCat服务响应超时，请稍后重试"),
    // ============ 收据相关错误 ============
    (
        "There is already another active subscriber using the same receipt",
        "此收据已被其他用户使用，请重新获取收据",
    ),
    ("Invalid receipt", "收据格式无效，请重新获取收据数据"),
    ("Receipt validation failed", "收据验证失败，请检查收据数据是否正确"),
    ("Invalid receipt data", "收据数据无效，请确认收据完整性"),
    ("Receipt not found", "未找到有效收据，请重新获取"),
    ("Malformed receipt", "收据格式错误，请重新获取收据"),
    // ============ 服务器错误 ============
    ("Internal Server Error", "RevenueCat服务内部错误，请稍后重试"),
    ("Service Unavailable", "RevenueCat服务暂时不可用，请稍后重试"),
    ("Bad Gateway", "RevenueCat服务网关错误，请稍后重试"),
    ("Gateway Timeout", "RevenueCat服务网关超时，请稍后重试"),
    // ============ HTTP 状态码 ============
    ("400", "RevenueCat请求参数错误，请重新尝试"),
    ("401", "RevenueCat认证失败，请稍后重试"),
    ("403", "RevenueCat访问被拒绝，请稍后重试"),
    ("404", "RevenueCat服务接口不存在，请联系技术支持"),
    ("429", "RevenueCat请求过于频繁，请稍后重试"),
    ("500", "RevenueCat服务内部错误，请稍后重试"),
    ("502", "RevenueCat服务网关错误，请稍后重试"),
    ("503", "RevenueCat服务暂时不可用，请稍后重试"),
    ("504", "RevenueCat服务超时，请稍后重试"),
];
