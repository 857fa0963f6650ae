use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    ScheduleService, conflict::check_schedules, conflict_response, invalid_schedule,
    normalize_schedule_inputs, schedule_not_found,
};
use crate::models::{
    ApiResponse,
    courses::{ScheduleInput, ScheduleListQuery, UpdateScheduleRequest},
};
use crate::services::Caller;

pub async fn update_schedule(
    service: &ScheduleService,
    id: i64,
    req: UpdateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_schedule(caller.business_id, id).await? else {
        return Ok(schedule_not_found());
    };

    // 未提供的字段沿用原值；room 传空字符串可清除教室
    let mut merged = [ScheduleInput {
        day_of_week: req.day_of_week.unwrap_or(current.day_of_week),
        start_time: req.start_time.unwrap_or(current.start_time),
        end_time: req.end_time.unwrap_or(current.end_time),
        room: req.room.or(current.room),
    }];
    if let Err(msg) = normalize_schedule_inputs(&mut merged) {
        return Ok(invalid_schedule(msg));
    }

    if !req.force_create {
        let course_name = storage
            .get_course(caller.business_id, current.course_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default();
        let existing = storage
            .list_schedules(caller.business_id, ScheduleListQuery::active())
            .await?;
        let check = check_schedules(
            Some(current.course_id),
            &course_name,
            &merged,
            &existing,
            Some(id),
        );
        if let Some(resp) = conflict_response(check) {
            return Ok(resp);
        }
    }

    let [schedule] = merged;
    match storage
        .update_schedule(caller.business_id, id, schedule)
        .await?
    {
        Some(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Schedule updated successfully",
        ))),
        None => Ok(schedule_not_found()),
    }
}
