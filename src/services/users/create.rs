use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    UserService, can_manage_role, check_account_available, role_forbidden,
    validate_account_fields,
};
use crate::models::{ApiResponse, users::CreateUserRequest};
use crate::services::Caller;
use crate::utils::password::hash_password;

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    user_data.username = user_data.username.trim().to_string();
    user_data.email = user_data.email.trim().to_lowercase();
    if let Some(resp) =
        validate_account_fields(&user_data.username, &user_data.email, &user_data.password)
    {
        return Ok(resp);
    }

    if !can_manage_role(&caller, user_data.role) {
        return Ok(role_forbidden());
    }

    let storage = service.get_storage(request)?;
    if let Some(resp) =
        check_account_available(&storage, &user_data.username, &user_data.email).await?
    {
        return Ok(resp);
    }

    user_data.password = hash_password(&user_data.password)?;

    let user = storage.create_user(caller.business_id, user_data).await?;
    info!(
        "User {} ({}) created in business {}",
        user.username, user.role, caller.business_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
}
