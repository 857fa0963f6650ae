use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, courses::ScheduleListQuery};
use crate::services::Caller;

pub async fn list_schedules(
    service: &ScheduleService,
    query: ScheduleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let items = storage.list_schedules(caller.business_id, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        items,
        "Schedule list retrieved successfully",
    )))
}
