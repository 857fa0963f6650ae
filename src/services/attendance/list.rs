use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, attendance::AttendanceListQuery};
use crate::services::Caller;

pub async fn list_attendance(
    service: &AttendanceService,
    query: AttendanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_attendance_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Attendance list retrieved successfully",
    )))
}
