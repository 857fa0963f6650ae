use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, check_capacity};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::CourseStatus,
    enrollments::{CreateEnrollmentRequest, EnrollmentStatus},
};
use crate::services::Caller;
use crate::services::schedules::course_not_found;
use crate::services::students::student_not_found;

pub async fn create_enrollment(
    service: &EnrollmentService,
    req: CreateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage
        .get_student(caller.business_id, req.student_id)
        .await?
        .is_none()
    {
        return Ok(student_not_found());
    }
    let Some(course) = storage.get_course(caller.business_id, req.course_id).await? else {
        return Ok(course_not_found());
    };
    if course.status != CourseStatus::Active {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Course is archived",
        )));
    }

    let existing = storage
        .find_enrollment(caller.business_id, req.student_id, req.course_id)
        .await?;
    if existing
        .as_ref()
        .is_some_and(|e| e.status == EnrollmentStatus::Active)
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentAlreadyExists,
            "Student is already enrolled in this course",
        )));
    }

    if let Some(resp) = check_capacity(&storage, caller.business_id, &course).await? {
        return Ok(resp);
    }

    // 退课或结课后重新报名，复用原记录
    let enrollment = match existing {
        Some(previous) => storage
            .update_enrollment_status(caller.business_id, previous.id, EnrollmentStatus::Active)
            .await?
            .unwrap_or(previous),
        None => storage.create_enrollment(caller.business_id, req).await?,
    };

    info!(
        "Student {} enrolled in course {}",
        enrollment.student_id, enrollment.course_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        enrollment,
        "Enrollment created successfully",
    )))
}
