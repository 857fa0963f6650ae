use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EmployeeService, check_linked_user, employee_not_found, validate_pay_fields};
use crate::models::{ApiResponse, ErrorCode, employees::UpdateEmployeeRequest};
use crate::services::Caller;

pub async fn update_employee(
    service: &EmployeeService,
    id: i64,
    mut update: UpdateEmployeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Employee name cannot be empty",
            )));
        }
    }
    if let Err(msg) = validate_pay_fields(
        update.email.as_deref(),
        update.hourly_rate,
        update.commission_percentage,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Some(resp) = check_linked_user(&storage, caller.business_id, update.user_id).await? {
        return Ok(resp);
    }

    match storage
        .update_employee(caller.business_id, id, update)
        .await?
    {
        Some(employee) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            employee,
            "Employee updated successfully",
        ))),
        None => Ok(employee_not_found()),
    }
}
