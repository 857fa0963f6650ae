use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn delete_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.delete_grade(caller.business_id, id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully")))
    } else {
        Ok(grade_not_found())
    }
}
