use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, attendance::RecordAttendanceRequest};
use crate::services::Caller;
use crate::services::schedules::course_not_found;

pub async fn record_attendance(
    service: &AttendanceService,
    req: RecordAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if req.records.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "At least one attendance record is required",
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = req.records.iter().find(|r| !seen.insert(r.student_id)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!("Student {} appears more than once", dup.student_id),
        )));
    }

    let storage = service.get_storage(request)?;
    if storage
        .get_course(caller.business_id, req.course_id)
        .await?
        .is_none()
    {
        return Ok(course_not_found());
    }
    for entry in &req.records {
        if storage
            .get_student(caller.business_id, entry.student_id)
            .await?
            .is_none()
        {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                format!("Student {} not found", entry.student_id),
            )));
        }
    }

    let (course_id, date) = (req.course_id, req.date);
    let records = storage
        .upsert_attendance(caller.business_id, caller.user_id, req)
        .await?;
    info!(
        "Recorded {} attendance row(s) for course {} on {}",
        records.len(),
        course_id,
        date
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        records,
        "Attendance recorded successfully",
    )))
}
