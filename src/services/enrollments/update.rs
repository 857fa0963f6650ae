use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, check_capacity, enrollment_not_found};
use crate::models::{
    ApiResponse,
    enrollments::{EnrollmentStatus, UpdateEnrollmentRequest},
};
use crate::services::Caller;
use crate::services::schedules::course_not_found;

pub async fn update_enrollment(
    service: &EnrollmentService,
    id: i64,
    req: UpdateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_enrollment(caller.business_id, id).await? else {
        return Ok(enrollment_not_found());
    };

    // 重新激活会占用名额
    if req.status == EnrollmentStatus::Active && current.status != EnrollmentStatus::Active {
        let Some(course) = storage
            .get_course(caller.business_id, current.course_id)
            .await?
        else {
            return Ok(course_not_found());
        };
        if let Some(resp) = check_capacity(&storage, caller.business_id, &course).await? {
            return Ok(resp);
        }
    }

    match storage
        .update_enrollment_status(caller.business_id, id, req.status)
        .await?
    {
        Some(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment updated successfully",
        ))),
        None => Ok(enrollment_not_found()),
    }
}
