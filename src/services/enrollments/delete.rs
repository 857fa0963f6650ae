use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, enrollment_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn delete_enrollment(
    service: &EnrollmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.delete_enrollment(caller.business_id, id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Enrollment deleted successfully",
        )))
    } else {
        Ok(enrollment_not_found())
    }
}
