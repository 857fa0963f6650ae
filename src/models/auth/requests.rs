use crate::models::businesses::BusinessType;
use serde::Deserialize;
use ts_rs::TS;

// 用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub username: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

/// 注册请求：同时创建商户和所有者账号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub business_name: String,
    pub business_type: BusinessType,
    pub currency: Option<String>,
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}
