use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EmployeePaymentService;
use crate::models::{ApiResponse, employee_payments::EmployeePaymentListQuery};
use crate::services::Caller;

pub async fn list_payments(
    service: &EmployeePaymentService,
    query: EmployeePaymentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_employee_payments_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Employee payment list retrieved successfully",
    )))
}
