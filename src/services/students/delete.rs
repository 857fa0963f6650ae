use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, student_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.delete_student(caller.business_id, id).await? {
        info!("Student {} deleted by user {}", id, caller.user_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
    } else {
        Ok(student_not_found())
    }
}
