use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, courses::CourseListQuery};
use crate::services::Caller;

pub async fn list_courses(
    service: &CourseService,
    query: CourseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_courses_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Course list retrieved successfully",
    )))
}
