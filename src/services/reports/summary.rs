use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, NaiveDate, Utc};

use super::ReportService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, reports::SummaryQuery};
use crate::services::Caller;
use crate::utils::validate::validate_date_range;

/// 缺省区间：本月第一天到今天
fn resolve_range(query: &SummaryQuery, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = query.end.unwrap_or(today);
    let start = query
        .start
        .unwrap_or_else(|| end.with_day(1).unwrap_or(end));
    (start, end)
}

pub async fn get_summary(
    service: &ReportService,
    query: SummaryQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let today = Utc::now().date_naive();
    let (start, end) = resolve_range(&query, today);
    let max_days = AppConfig::get().business.max_report_range_days;
    if let Err(msg) = validate_date_range(start, end, max_days) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidDateRange, msg)));
    }

    let storage = service.get_storage(request)?;
    // 先刷新逾期状态，保证计数准确
    storage.mark_overdue_fees(caller.business_id, today).await?;
    let summary = storage
        .get_dashboard_summary(caller.business_id, caller.user_id, Some(start), Some(end))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Summary retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_resolve_range_defaults_to_month_to_date() {
        let (start, end) = resolve_range(&SummaryQuery::default(), d(2025, 3, 18));
        assert_eq!(start, d(2025, 3, 1));
        assert_eq!(end, d(2025, 3, 18));
    }

    #[test]
    fn test_resolve_range_keeps_explicit_bounds() {
        let query = SummaryQuery {
            start: Some(d(2025, 1, 5)),
            end: Some(d(2025, 2, 10)),
        };
        assert_eq!(resolve_range(&query, d(2025, 3, 18)), (d(2025, 1, 5), d(2025, 2, 10)));
    }
}
