use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::FeeService;
use crate::models::{ApiResponse, fees::FeeListQuery};
use crate::services::Caller;

pub async fn list_fees(
    service: &FeeService,
    query: FeeListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let today = chrono::Utc::now().date_naive();
    let marked = storage.mark_overdue_fees(caller.business_id, today).await?;
    if marked > 0 {
        debug!(
            "Marked {} fee(s) overdue in business {}",
            marked, caller.business_id
        );
    }

    let response = storage
        .list_fees_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Fee list retrieved successfully",
    )))
}
