use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PayrollService, build_report, check_range};
use crate::models::{ApiResponse, payroll::PayrollQuery};
use crate::services::Caller;

pub async fn get_report(
    service: &PayrollService,
    query: PayrollQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if let Some(resp) = check_range(query.start, query.end) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    let report = build_report(&storage, caller.business_id, query.start, query.end).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        report,
        "Payroll report generated successfully",
    )))
}
