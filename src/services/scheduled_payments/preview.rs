use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduledPaymentService, recurrence::upcoming_dates, scheduled_payment_not_found};
use crate::models::{
    ApiResponse,
    scheduled_payments::{PreviewQuery, PreviewResponse},
};
use crate::services::Caller;

const DEFAULT_PREVIEW_COUNT: u32 = 5;
const MAX_PREVIEW_COUNT: u32 = 60;

pub async fn preview(
    service: &ScheduledPaymentService,
    id: i64,
    query: PreviewQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(scheduled) = storage
        .get_scheduled_payment(caller.business_id, id)
        .await?
    else {
        return Ok(scheduled_payment_not_found());
    };

    let count = query
        .count
        .unwrap_or(DEFAULT_PREVIEW_COUNT)
        .clamp(1, MAX_PREVIEW_COUNT) as usize;
    let dates = if scheduled.is_active {
        upcoming_dates(
            scheduled.next_run_date,
            scheduled.recurrence,
            scheduled.day_of_month,
            scheduled.end_date,
            count,
        )
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PreviewResponse {
            scheduled_payment_id: scheduled.id,
            dates,
        },
        "Preview generated successfully",
    )))
}
