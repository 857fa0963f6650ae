use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, check_teacher, validate_course_fields};
use crate::models::{ApiResponse, ErrorCode, courses::UpdateCourseRequest};
use crate::services::Caller;
use crate::services::schedules::course_not_found;

pub async fn update_course(
    service: &CourseService,
    id: i64,
    mut update: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Course name cannot be empty",
            )));
        }
    }
    if let Err(msg) = validate_course_fields(update.monthly_fee, update.capacity) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Some(resp) = check_teacher(&storage, caller.business_id, update.teacher_id).await? {
        return Ok(resp);
    }

    match storage.update_course(caller.business_id, id, update).await? {
        Some(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        None => Ok(course_not_found()),
    }
}
