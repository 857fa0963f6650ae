//! 仪表盘统计

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct SummaryQuery {
    /// 缺省为本月第一天
    pub start: Option<NaiveDate>,
    /// 缺省为今天
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct DashboardSummary {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub active_students: i64,
    pub active_courses: i64,
    pub active_employees: i64,
    pub active_enrollments: i64,
    pub pending_fees_count: i64,
    pub pending_fees_amount: f64,
    pub overdue_fees_count: i64,
    /// 区间内实收学费
    pub collected_amount: f64,
    pub open_orders: i64,
    /// 区间内餐饮营业额
    pub order_revenue: f64,
    pub upcoming_reservations: i64,
    pub unread_notifications: i64,
}
