use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    // 用户角色
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserRole("用户角色") {
        Owner => "owner",     // 商户所有者
        Admin => "admin",     // 管理员
        Teacher => "teacher", // 教师
        Staff => "staff",     // 普通员工
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Owner, &Self::Admin]
    }
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Owner, &Self::Admin, &Self::Staff]
    }
    pub fn teaching_roles() -> &'static [&'static UserRole] {
        &[&Self::Owner, &Self::Admin, &Self::Teacher]
    }

    /// 所有者和管理员属于特权角色，只有所有者可以授予或修改
    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Owner | UserRole::Admin)
    }
}

define_str_enum! {
    // 用户状态
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserStatus("用户状态") {
        Active => "active",       // 活跃
        Inactive => "inactive",   // 非活跃
        Suspended => "suspended", // 暂停
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub business_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.business_id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}
