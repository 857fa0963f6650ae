use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    ScheduledPaymentService, bad_request, scheduled_payment_not_found, validate_day_of_month,
};
use crate::models::{ApiResponse, scheduled_payments::UpdateScheduledPaymentRequest};
use crate::services::Caller;
use crate::utils::validate::validate_positive_amount;

pub async fn update_scheduled_payment(
    service: &ScheduledPaymentService,
    id: i64,
    mut update: UpdateScheduledPaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;

    if let Some(description) = update.description.as_mut() {
        *description = description.trim().to_string();
        if description.is_empty() {
            return Ok(bad_request("Description cannot be empty"));
        }
    }
    if let Some(amount) = update.amount
        && let Err(msg) = validate_positive_amount(amount)
    {
        return Ok(bad_request(msg));
    }
    if let Err(msg) = validate_day_of_month(update.day_of_month) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request)?;
    let Some(current) = storage
        .get_scheduled_payment(caller.business_id, id)
        .await?
    else {
        return Ok(scheduled_payment_not_found());
    };

    let next_run = update.next_run_date.unwrap_or(current.next_run_date);
    if let Some(end) = update.end_date.or(current.end_date)
        && end < next_run
        && update.is_active.unwrap_or(current.is_active)
    {
        return Ok(bad_request("End date is before the next run date"));
    }

    match storage
        .update_scheduled_payment(caller.business_id, id, update)
        .await?
    {
        Some(scheduled) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            scheduled,
            "Scheduled payment updated successfully",
        ))),
        None => Ok(scheduled_payment_not_found()),
    }
}
