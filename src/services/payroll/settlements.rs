//! 佣金结算
//!
//! 只计入区间内尚未结算的已付学费；净额生成一笔已付的佣金付款。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::calculator::commission_breakdown;
use super::{PayrollService, check_range, day_bounds};
use crate::models::{
    ApiResponse, ErrorCode,
    employees::PaymentModel,
    notifications::NotificationType,
    payroll::{CreateSettlementRequest, NewSettlement, SettlementListQuery},
};
use crate::services::Caller;
use crate::services::employees::employee_not_found;
use crate::services::notifications::notify_user;
use crate::utils::money;

pub async fn create_settlement(
    service: &PayrollService,
    req: CreateSettlementRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if let Some(resp) = check_range(req.period_start, req.period_end) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    let Some(employee) = storage
        .get_employee(caller.business_id, req.employee_id)
        .await?
    else {
        return Ok(employee_not_found());
    };
    if employee.payment_model != PaymentModel::Commission {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Employee is not paid by commission",
        )));
    }

    let Some(business) = storage.get_business(caller.business_id).await? else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BusinessNotFound,
            "Business not found",
        )));
    };
    let courses = storage.list_all_courses(caller.business_id).await?;
    let (from_ts, to_ts) = day_bounds(req.period_start, req.period_end);
    let unsettled = storage
        .list_paid_fees(caller.business_id, from_ts, to_ts, true)
        .await?;

    let breakdown = commission_breakdown(
        &employee,
        req.period_start,
        req.period_end,
        business.expense_reserve_percentage,
        business.benefits_reserve_percentage,
        &courses,
        &unsettled,
    );
    if breakdown.fee_ids.is_empty() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::NothingToSettle,
            "No unsettled paid fees in this period",
        )));
    }

    let settlement = storage
        .create_settlement(
            caller.business_id,
            NewSettlement {
                employee_id: employee.id,
                period_start: req.period_start,
                period_end: req.period_end,
                fee_ids: breakdown.fee_ids,
                gross_amount: money::to_f64(breakdown.gross),
                expense_reserve: money::to_f64(breakdown.expense_reserve),
                benefits_reserve: money::to_f64(breakdown.benefits_reserve),
                net_amount: money::to_f64(breakdown.net),
                created_by: caller.user_id,
            },
        )
        .await?;

    info!(
        "Settlement {} for employee {}: {} fee(s), net {:.2}",
        settlement.id, employee.id, settlement.fee_count, settlement.net_amount
    );
    if let Some(user_id) = employee.user_id {
        notify_user(
            &storage,
            caller.business_id,
            user_id,
            NotificationType::CommissionSettled,
            "Commission settled",
            Some(format!(
                "{} to {}: {:.2} {}",
                settlement.period_start, settlement.period_end, settlement.net_amount,
                business.currency
            )),
        )
        .await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        settlement,
        "Commission settled successfully",
    )))
}

pub async fn list_settlements(
    service: &PayrollService,
    query: SettlementListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let response = storage
        .list_settlements_with_pagination(caller.business_id, query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settlement list retrieved successfully",
    )))
}
