use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, normalize_student};
use crate::models::{ApiResponse, ErrorCode, students::CreateStudentRequest};
use crate::services::Caller;

pub async fn create_student(
    service: &StudentService,
    mut req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Err(msg) = normalize_student(&mut req) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    let student = storage.create_student(caller.business_id, req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        student,
        "Student created successfully",
    )))
}
