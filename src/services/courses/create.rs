use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, check_teacher, validate_course_fields};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{CourseDetail, CreateCourseRequest, ScheduleListQuery},
};
use crate::services::Caller;
use crate::services::schedules::{
    conflict::check_schedules, conflict_response, invalid_schedule, normalize_schedule_inputs,
};

pub async fn create_course(
    service: &CourseService,
    mut req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    req.name = req.name.trim().to_string();
    if req.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course name is required",
        )));
    }
    if let Err(msg) = validate_course_fields(Some(req.monthly_fee), req.capacity) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = normalize_schedule_inputs(&mut req.schedules) {
        return Ok(invalid_schedule(msg));
    }

    let storage = service.get_storage(request)?;
    if let Some(resp) = check_teacher(&storage, caller.business_id, req.teacher_id).await? {
        return Ok(resp);
    }

    // 新课程没有自己的排课，已有排课只可能产生教室冲突；批内重叠按重复处理
    if !req.force_create && !req.schedules.is_empty() {
        let existing = storage
            .list_schedules(caller.business_id, ScheduleListQuery::active())
            .await?;
        let check = check_schedules(None, &req.name, &req.schedules, &existing, None);
        if let Some(resp) = conflict_response(check) {
            return Ok(resp);
        }
    }

    let (course, schedules) = storage
        .create_course_with_schedules(caller.business_id, req)
        .await?;
    info!(
        "Course {} created with {} schedule(s) in business {}",
        course.id,
        schedules.len(),
        caller.business_id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CourseDetail {
            course,
            schedules,
            enrolled_count: 0,
        },
        "Course created successfully",
    )))
}
