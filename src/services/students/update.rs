use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, student_not_found};
use crate::models::{ApiResponse, ErrorCode, students::UpdateStudentRequest};
use crate::services::Caller;
use crate::utils::validate::validate_email;

pub async fn update_student(
    service: &StudentService,
    id: i64,
    mut update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Student name cannot be empty",
            )));
        }
    }
    if let Some(email) = update.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    let storage = service.get_storage(request)?;
    match storage.update_student(caller.business_id, id, update).await? {
        Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        None => Ok(student_not_found()),
    }
}
