use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    ScheduleService, conflict::check_schedules as run_check, course_not_found,
    invalid_schedule, normalize_schedule_inputs,
};
use crate::models::{
    ApiResponse,
    courses::{ScheduleCheckRequest, ScheduleListQuery},
};
use crate::services::Caller;

pub async fn check_schedules(
    service: &ScheduleService,
    mut req: ScheduleCheckRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Err(msg) = normalize_schedule_inputs(&mut req.schedules) {
        return Ok(invalid_schedule(msg));
    }

    let storage = service.get_storage(request)?;
    let course_name = match req.course_id {
        Some(course_id) => match storage.get_course(caller.business_id, course_id).await? {
            Some(course) => course.name,
            None => return Ok(course_not_found()),
        },
        None => String::new(),
    };

    let existing = storage
        .list_schedules(caller.business_id, ScheduleListQuery::active())
        .await?;
    let report = run_check(
        req.course_id,
        &course_name,
        &req.schedules,
        &existing,
        req.exclude_schedule_id,
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Schedule check completed")))
}
