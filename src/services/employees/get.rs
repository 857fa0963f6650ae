use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EmployeeService, employee_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn get_employee(
    service: &EmployeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_employee(caller.business_id, id).await? {
        Some(employee) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            employee,
            "Employee retrieved successfully",
        ))),
        None => Ok(employee_not_found()),
    }
}
