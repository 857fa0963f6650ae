use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{FeeService, fee_already_paid, fee_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    fees::{FeeStatus, PayFeeRequest},
    notifications::NotificationType,
    users::UserRole,
};
use crate::services::Caller;
use crate::services::notifications::notify_roles;

pub async fn pay_fee(
    service: &FeeService,
    id: i64,
    req: PayFeeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_fee(caller.business_id, id).await? else {
        return Ok(fee_not_found());
    };
    match current.status {
        FeeStatus::Paid => return Ok(fee_already_paid()),
        FeeStatus::Cancelled => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "Cancelled fees cannot be paid",
            )));
        }
        FeeStatus::Pending | FeeStatus::Overdue => {}
    }

    let paid_at = req.paid_at.unwrap_or_else(chrono::Utc::now).timestamp();
    let Some(fee) = storage
        .pay_fee(caller.business_id, id, req.payment_method, paid_at)
        .await?
    else {
        return Ok(fee_not_found());
    };

    info!(
        "Fee {} paid ({}, {}) by user {}",
        fee.id, fee.amount, req.payment_method, caller.user_id
    );
    notify_roles(
        &storage,
        caller.business_id,
        &[UserRole::Owner, UserRole::Admin],
        NotificationType::FeePaid,
        "Fee paid",
        Some(format!("{} ({:.2})", fee.description, fee.amount)),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "Fee paid successfully")))
}
