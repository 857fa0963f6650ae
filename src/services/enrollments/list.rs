use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, enrollments::EnrollmentListQuery};
use crate::services::Caller;

pub async fn list_enrollments(
    service: &EnrollmentService,
    query: EnrollmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_enrollments_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Enrollment list retrieved successfully",
    )))
}
