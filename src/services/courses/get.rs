use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, courses::CourseDetail};
use crate::services::Caller;
use crate::services::schedules::course_not_found;

pub async fn get_course(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(course) = storage.get_course(caller.business_id, id).await? else {
        return Ok(course_not_found());
    };
    let schedules = storage.list_course_schedules(caller.business_id, id).await?;
    let enrolled_count = storage
        .count_active_enrollments(caller.business_id, id)
        .await? as i64;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetail {
            course,
            schedules,
            enrolled_count,
        },
        "Course retrieved successfully",
    )))
}
