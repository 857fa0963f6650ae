use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn delete_schedule(
    service: &ScheduleService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.delete_schedule(caller.business_id, id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted successfully")))
    } else {
        Ok(schedule_not_found())
    }
}
