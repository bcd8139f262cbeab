use serde::Deserialize;
use ts_rs::TS;

// OAuth 登录请求（网关完成身份校验后转发过来的身份信息）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct OAuthLoginRequest {
    /// OAuth 提供方的 subject 标识
    pub subject: String,
    /// 已验证的邮箱
    pub email: String,
    /// 显示名称
    pub profile_name: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 更新个人资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub profile_name: Option<String>,
}
