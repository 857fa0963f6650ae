use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::ApiResponse;
use crate::services::Caller;
use crate::services::schedules::course_not_found;

pub async fn delete_course(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.delete_course(caller.business_id, id).await? {
        info!("Course {} deleted by user {}", id, caller.user_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
    } else {
        Ok(course_not_found())
    }
}
