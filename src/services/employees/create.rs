use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EmployeeService, check_linked_user, validate_pay_fields};
use crate::models::{ApiResponse, ErrorCode, employees::CreateEmployeeRequest};
use crate::services::Caller;

pub async fn create_employee(
    service: &EmployeeService,
    mut req: CreateEmployeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    req.name = req.name.trim().to_string();
    if req.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Employee name is required",
        )));
    }
    if let Err(msg) = validate_pay_fields(
        req.email.as_deref(),
        Some(req.hourly_rate),
        Some(req.commission_percentage),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Some(resp) = check_linked_user(&storage, caller.business_id, req.user_id).await? {
        return Ok(resp);
    }

    let employee = storage.create_employee(caller.business_id, req).await?;
    info!(
        "Employee {} ({}) created in business {}",
        employee.id, employee.payment_model, caller.business_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        employee,
        "Employee created successfully",
    )))
}
