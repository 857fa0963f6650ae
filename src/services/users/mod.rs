pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::{
    CreateUserRequest, UpdateUserRequest, User, UserListQuery, UserRole, UserStatus,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::Caller;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(UserService);

impl UserService {
    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }
}

/// 校验账号字段，失败时返回可直接响应的 400
pub(crate) fn validate_account_fields(
    username: &str,
    email: &str,
    password: &str,
) -> Option<HttpResponse> {
    if let Err(msg) = validate_username(username) {
        return Some(
            HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)),
        );
    }
    if let Err(msg) = validate_email(email) {
        return Some(
            HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)),
        );
    }
    if let Err(msg) = validate_password_simple(password) {
        return Some(
            HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)),
        );
    }
    None
}

/// 检查用户名与邮箱是否已被占用
pub(crate) async fn check_account_available(
    storage: &Arc<dyn Storage>,
    username: &str,
    email: &str,
) -> ActixResult<Option<HttpResponse>> {
    if storage.get_user_by_username(username).await?.is_some() {
        return Ok(Some(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))));
    }
    if storage.get_user_by_email(email).await?.is_some() {
        return Ok(Some(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))));
    }
    Ok(None)
}

/// 只有所有者可以授予或操作所有者 / 管理员角色
pub(crate) fn can_manage_role(caller: &Caller, role: UserRole) -> bool {
    caller.role == UserRole::Owner || !role.is_privileged()
}

/// 修改后目标账号是否不再是有效的所有者
pub(crate) fn drops_owner(target: &User, update: &UpdateUserRequest) -> bool {
    target.role == UserRole::Owner
        && target.status == UserStatus::Active
        && (update.role.is_some_and(|role| role != UserRole::Owner)
            || update.status.is_some_and(|status| status != UserStatus::Active))
}

fn role_forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::RoleChangeForbidden,
        "Only the owner can manage owner or admin accounts",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpMessage;

    fn caller(role: UserRole) -> Caller {
        Caller {
            user_id: 1,
            business_id: 1,
            role,
        }
    }

    #[test]
    fn test_can_manage_role() {
        assert!(can_manage_role(&caller(UserRole::Owner), UserRole::Admin));
        assert!(can_manage_role(&caller(UserRole::Owner), UserRole::Owner));
        assert!(can_manage_role(&caller(UserRole::Admin), UserRole::Teacher));
        assert!(!can_manage_role(&caller(UserRole::Admin), UserRole::Admin));
        assert!(!can_manage_role(&caller(UserRole::Admin), UserRole::Owner));
    }

    fn owner() -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            business_id: 1,
            username: "owner".to_string(),
            email: "owner@localhost".to_string(),
            password_hash: String::new(),
            role: UserRole::Owner,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn update(role: Option<UserRole>, status: Option<UserStatus>) -> UpdateUserRequest {
        UpdateUserRequest {
            email: None,
            password: None,
            role,
            status,
            display_name: None,
        }
    }

    #[test]
    fn test_drops_owner() {
        let target = owner();
        assert!(drops_owner(&target, &update(Some(UserRole::Admin), None)));
        assert!(drops_owner(&target, &update(None, Some(UserStatus::Inactive))));
        assert!(!drops_owner(&target, &update(Some(UserRole::Owner), None)));
        assert!(!drops_owner(&target, &update(None, None)));

        let mut admin = owner();
        admin.role = UserRole::Admin;
        assert!(!drops_owner(&admin, &update(Some(UserRole::Staff), None)));
    }

    #[test]
    fn test_validate_account_fields() {
        assert!(validate_account_fields("alice", "alice@example.com", "Password123").is_none());
        let resp = validate_account_fields("a", "alice@example.com", "Password123")
            .expect("short username rejected");
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert!(validate_account_fields("alice", "not-an-email", "Password123").is_some());
    }

    #[actix_web::test]
    async fn test_last_owner_cannot_step_down() {
        use crate::models::businesses::{BusinessType, CreateBusinessRequest};
        use crate::storage::sea_orm_storage::SeaOrmStorage;
        use actix_web::test::TestRequest;

        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let (_, owner) = storage
            .create_business_with_owner(
                CreateBusinessRequest {
                    name: "Acme".to_string(),
                    business_type: BusinessType::Retail,
                    currency: "USD".to_string(),
                },
                CreateUserRequest {
                    username: "acme_owner".to_string(),
                    email: "owner@acme.test".to_string(),
                    password: "hashed".to_string(),
                    role: UserRole::Owner,
                    display_name: None,
                },
            )
            .await
            .expect("register business");

        let service = UserService::with_storage(Arc::new(storage));
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(owner.clone());

        let resp = service
            .update_user(owner.id, update(Some(UserRole::Admin), None), &request)
            .await
            .expect("handler result");
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

        let resp = service
            .update_user(owner.id, update(None, None), &request)
            .await
            .expect("handler result");
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    }
}
