use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduledPaymentService;
use crate::models::{ApiResponse, scheduled_payments::ScheduledPaymentListQuery};
use crate::services::Caller;

pub async fn list_scheduled_payments(
    service: &ScheduledPaymentService,
    query: ScheduledPaymentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_scheduled_payments_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Scheduled payment list retrieved successfully",
    )))
}
