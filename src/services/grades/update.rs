use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found, validate_score};
use crate::models::{ApiResponse, ErrorCode, grades::UpdateGradeRequest};
use crate::services::Caller;

pub async fn update_grade(
    service: &GradeService,
    id: i64,
    mut update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_grade(caller.business_id, id).await? else {
        return Ok(grade_not_found());
    };

    if let Some(title) = update.title.as_mut() {
        *title = title.trim().to_string();
        if title.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Grade title cannot be empty",
            )));
        }
    }
    // 与原值合并后再校验分数范围
    let score = update.score.unwrap_or(current.score);
    let max_score = update.max_score.unwrap_or(current.max_score);
    if let Err(msg) = validate_score(score, max_score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.update_grade(caller.business_id, id, update).await? {
        Some(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade updated successfully",
        ))),
        None => Ok(grade_not_found()),
    }
}
