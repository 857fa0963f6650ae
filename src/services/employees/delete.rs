use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EmployeeService, employee_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn delete_employee(
    service: &EmployeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.delete_employee(caller.business_id, id).await? {
        info!("Employee {} deleted by user {}", id, caller.user_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Employee deleted successfully")))
    } else {
        Ok(employee_not_found())
    }
}
