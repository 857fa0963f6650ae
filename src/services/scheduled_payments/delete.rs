use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduledPaymentService, scheduled_payment_not_found};
use crate::models::ApiResponse;
use crate::services::Caller;

pub async fn delete_scheduled_payment(
    service: &ScheduledPaymentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage
        .delete_scheduled_payment(caller.business_id, id)
        .await?
    {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Scheduled payment deleted successfully",
        )))
    } else {
        Ok(scheduled_payment_not_found())
    }
}
