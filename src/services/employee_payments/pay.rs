use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EmployeePaymentService, employee_payment_not_found};
use crate::models::{ApiResponse, ErrorCode, employee_payments::EmployeePaymentStatus};
use crate::services::Caller;

pub async fn pay_payment(
    service: &EmployeePaymentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_employee_payment(caller.business_id, id).await? else {
        return Ok(employee_payment_not_found());
    };
    if current.status == EmployeePaymentStatus::Paid {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Employee payment is already paid",
        )));
    }

    let Some(payment) = storage.pay_employee_payment(caller.business_id, id).await? else {
        return Ok(employee_payment_not_found());
    };

    info!(
        "Employee payment {} ({:.2}) marked paid by user {}",
        payment.id, payment.amount, caller.user_id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        payment,
        "Employee payment marked as paid",
    )))
}
