pub mod calculator;
pub mod export;
pub mod report;
pub mod settlements;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{BizDeskError, Result};
use crate::models::courses::ScheduleListQuery;
use crate::models::payroll::{
    CreateSettlementRequest, PayrollExportQuery, PayrollQuery, PayrollReport,
    SettlementListQuery,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_date_range;

use calculator::{PayrollInput, calculate_payroll, payroll_totals};

pub struct PayrollService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(PayrollService);

impl PayrollService {
    // 区间工资报表，每次请求重新计算
    pub async fn get_report(
        &self,
        query: PayrollQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::get_report(self, query, request).await
    }

    pub async fn export_report(
        &self,
        query: PayrollExportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_report(self, query, request).await
    }

    // 佣金结算
    pub async fn create_settlement(
        &self,
        req: CreateSettlementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settlements::create_settlement(self, req, request).await
    }

    pub async fn list_settlements(
        &self,
        query: SettlementListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settlements::list_settlements(self, query, request).await
    }
}

/// 闭区间 `[start, end]` 对应的时间戳半开区间 `[from, to)`（UTC）
pub(crate) fn day_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let from = start.and_hms_opt(0, 0, 0).map(|t| t.and_utc().timestamp());
    let to = end
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().timestamp());
    (from.unwrap_or(i64::MIN), to.unwrap_or(i64::MAX))
}

/// 校验报表区间，失败时返回 400
pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Option<HttpResponse> {
    let max_days = AppConfig::get().business.max_report_range_days;
    validate_date_range(start, end, max_days).err().map(|msg| {
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidDateRange, msg))
    })
}

/// 查询所需数据并计算工资报表
pub(crate) async fn build_report(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PayrollReport> {
    let business = storage
        .get_business(business_id)
        .await?
        .ok_or_else(|| BizDeskError::not_found("Business not found"))?;
    let employees = storage.list_active_employees(business_id).await?;
    let courses = storage.list_all_courses(business_id).await?;
    let schedules: Vec<_> = storage
        .list_schedules(business_id, ScheduleListQuery::active())
        .await?
        .into_iter()
        .map(|item| item.schedule)
        .collect();
    let (from_ts, to_ts) = day_bounds(start, end);
    let paid_fees = storage
        .list_paid_fees(business_id, from_ts, to_ts, false)
        .await?;

    let items = calculate_payroll(&PayrollInput {
        start,
        end,
        expense_reserve_percentage: business.expense_reserve_percentage,
        benefits_reserve_percentage: business.benefits_reserve_percentage,
        employees: &employees,
        courses: &courses,
        schedules: &schedules,
        paid_fees: &paid_fees,
    });
    let totals = payroll_totals(&items);

    Ok(PayrollReport {
        start,
        end,
        currency: business.currency,
        items,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_cover_whole_days() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let (from, to) = day_bounds(start, end);
        assert_eq!(to - from, 31 * 86_400);
        assert_eq!(from, 1_740_787_200);
    }
}
