use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, can_manage_role, role_forbidden};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::Caller;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    // 禁止删除当前用户
    if user_id == caller.user_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        )));
    }

    let storage = service.get_storage(request)?;
    let Some(target) = storage.get_user(caller.business_id, user_id).await? else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        )));
    };
    if !can_manage_role(&caller, target.role) {
        return Ok(role_forbidden());
    }

    if storage.delete_user(caller.business_id, user_id).await? {
        info!("User {} deleted by {}", user_id, caller.user_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        )))
    }
}
