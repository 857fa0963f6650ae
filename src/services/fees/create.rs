use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeeService;
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{CreateFeeRequest, NewStudentFee},
};
use crate::services::Caller;
use crate::services::schedules::course_not_found;
use crate::services::students::student_not_found;
use crate::utils::validate::validate_positive_amount;

pub async fn create_fee(
    service: &FeeService,
    req: CreateFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    let description = req.description.trim().to_string();
    if description.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Fee description is required",
        )));
    }
    if let Err(msg) = validate_positive_amount(req.amount) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if storage
        .get_student(caller.business_id, req.student_id)
        .await?
        .is_none()
    {
        return Ok(student_not_found());
    }
    if let Some(course_id) = req.course_id
        && storage.get_course(caller.business_id, course_id).await?.is_none()
    {
        return Ok(course_not_found());
    }

    let fee = storage
        .create_fee(
            caller.business_id,
            NewStudentFee {
                student_id: req.student_id,
                course_id: req.course_id,
                scheduled_payment_id: None,
                description,
                amount: req.amount,
                due_date: req.due_date,
            },
        )
        .await?;
    info!(
        "Fee {} ({}) created for student {}",
        fee.id, fee.amount, fee.student_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(fee, "Fee created successfully")))
}
