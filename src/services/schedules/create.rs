use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    ScheduleService, conflict::check_schedules, conflict_response, course_not_found,
    invalid_schedule, normalize_schedule_inputs,
};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{CreateSchedulesRequest, ScheduleListQuery},
};
use crate::services::Caller;

pub async fn create_schedules(
    service: &ScheduleService,
    course_id: i64,
    mut req: CreateSchedulesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if req.schedules.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "At least one schedule is required",
        )));
    }
    if let Err(msg) = normalize_schedule_inputs(&mut req.schedules) {
        return Ok(invalid_schedule(msg));
    }

    let storage = service.get_storage(request)?;
    let Some(course) = storage.get_course(caller.business_id, course_id).await? else {
        return Ok(course_not_found());
    };

    if !req.force_create {
        let existing = storage
            .list_schedules(caller.business_id, ScheduleListQuery::active())
            .await?;
        let check = check_schedules(Some(course.id), &course.name, &req.schedules, &existing, None);
        if let Some(resp) = conflict_response(check) {
            return Ok(resp);
        }
    }

    let schedules = storage
        .create_schedules(caller.business_id, course.id, req.schedules)
        .await?;
    info!(
        "Added {} schedule(s) to course {}",
        schedules.len(),
        course.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        schedules,
        "Schedules created successfully",
    )))
}
