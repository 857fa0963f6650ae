use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{RegisterRequest, RegisterResponse},
    businesses::CreateBusinessRequest,
    users::{CreateUserRequest, UserRole},
};
use crate::services::users::{check_account_available, validate_account_fields};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_currency;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 1. 商户字段
    let business_name = register_request.business_name.trim().to_string();
    if business_name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Business name is required",
        )));
    }
    let currency = register_request
        .currency
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_else(|| config.business.default_currency.clone());
    if let Err(msg) = validate_currency(&currency) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 2. 所有者账号字段
    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_lowercase();
    if let Some(resp) = validate_account_fields(&username, &email, &register_request.password) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    if let Some(resp) = check_account_available(&storage, &username, &email).await? {
        return Ok(resp);
    }

    // 3. 哈希密码后在同一事务中创建商户和所有者
    let password = hash_password(&register_request.password)?;
    let business = CreateBusinessRequest {
        name: business_name,
        business_type: register_request.business_type,
        currency,
    };
    let owner = CreateUserRequest {
        username,
        email,
        password,
        role: UserRole::Owner,
        display_name: register_request.display_name,
    };

    let (business, user) = storage.create_business_with_owner(business, owner).await?;
    info!(
        "Registered business {} ({}) with owner {}",
        business.id, business.business_type, user.username
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        RegisterResponse { business, user },
        "Registration successful",
    )))
}
