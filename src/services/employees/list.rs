use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EmployeeService;
use crate::models::{ApiResponse, employees::EmployeeListQuery};
use crate::services::Caller;

pub async fn list_employees(
    service: &EmployeeService,
    query: EmployeeListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_employees_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Employee list retrieved successfully",
    )))
}
