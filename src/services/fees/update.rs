use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeeService, fee_already_paid, fee_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{FeeStatus, UpdateFeeRequest},
};
use crate::services::Caller;
use crate::services::schedules::course_not_found;
use crate::utils::validate::validate_positive_amount;

pub async fn update_fee(
    service: &FeeService,
    id: i64,
    mut update: UpdateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    // 缴费必须走 pay 接口，以记录支付方式和时间
    if update.status == Some(FeeStatus::Paid) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Use the pay endpoint to mark a fee as paid",
        )));
    }
    if let Some(description) = update.description.as_mut() {
        *description = description.trim().to_string();
        if description.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Fee description cannot be empty",
            )));
        }
    }
    if let Some(amount) = update.amount
        && let Err(msg) = validate_positive_amount(amount)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    let Some(current) = storage.get_fee(caller.business_id, id).await? else {
        return Ok(fee_not_found());
    };
    if current.status == FeeStatus::Paid {
        return Ok(fee_already_paid());
    }
    if let Some(course_id) = update.course_id
        && storage.get_course(caller.business_id, course_id).await?.is_none()
    {
        return Ok(course_not_found());
    }

    match storage.update_fee(caller.business_id, id, update).await? {
        Some(fee) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            fee,
            "Fee updated successfully",
        ))),
        None => Ok(fee_not_found()),
    }
}
