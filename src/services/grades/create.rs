use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, validate_score};
use crate::models::{ApiResponse, ErrorCode, grades::CreateGradeRequest};
use crate::services::Caller;
use crate::services::schedules::course_not_found;
use crate::services::students::student_not_found;

pub async fn create_grade(
    service: &GradeService,
    mut req: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    req.title = req.title.trim().to_string();
    if req.title.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Grade title is required",
        )));
    }
    if let Err(msg) = validate_score(req.score, req.max_score) {
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
    if storage
        .get_course(caller.business_id, req.course_id)
        .await?
        .is_none()
    {
        return Ok(course_not_found());
    }

    let grade = storage
        .create_grade(caller.business_id, caller.user_id, req)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade recorded successfully")))
}
