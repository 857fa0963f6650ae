use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeeService, fee_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::Caller;

pub async fn delete_fee(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let Some(current) = storage.get_fee(caller.business_id, id).await? else {
        return Ok(fee_not_found());
    };
    // 已计入佣金结算的学费不可删除
    if current.settlement_id.is_some() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Fee is part of a commission settlement",
        )));
    }

    if storage.delete_fee(caller.business_id, id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Fee deleted successfully")))
    } else {
        Ok(fee_not_found())
    }
}
