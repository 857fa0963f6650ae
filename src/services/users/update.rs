use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, can_manage_role, drops_owner, role_forbidden};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{UpdateUserRequest, UserRole, UserStatus},
};
use crate::services::Caller;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(target) = storage.get_user(caller.business_id, user_id).await? else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        )));
    };

    // 目标账号和新角色都要在调用者的权限范围内
    if !can_manage_role(&caller, target.role)
        || update_data
            .role
            .is_some_and(|role| !can_manage_role(&caller, role))
    {
        return Ok(role_forbidden());
    }

    // 商户至少保留一个有效的所有者
    if drops_owner(&target, &update_data) {
        let active_owners = storage
            .list_users_by_roles(caller.business_id, &[UserRole::Owner])
            .await?
            .into_iter()
            .filter(|u| u.status == UserStatus::Active)
            .count();
        if active_owners <= 1 {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::LastOwnerRequired,
                "The business must keep at least one active owner",
            )));
        }
    }

    if let Some(email) = update_data.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }
        if let Some(existing) = storage.get_user_by_email(email).await?
            && existing.id != user_id
        {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
    }

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
        }
        update_data.password = Some(hash_password(&password)?);
    }

    match storage
        .update_user(caller.business_id, user_id, update_data)
        .await?
    {
        Some(user) => {
            info!("User {} updated by {}", user.id, caller.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                user,
                "User information updated successfully",
            )))
        }
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
    }
}
