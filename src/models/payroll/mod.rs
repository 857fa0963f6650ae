//! 工资与佣金

use crate::models::common::{ExportFormat, PaginationInfo};
use crate::models::employees::PaymentModel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct PayrollQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct PayrollExportQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: Option<ExportFormat>,
}

/// 单个员工的工资计算结果
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct TeacherPayroll {
    pub employee_id: i64,
    pub name: String,
    pub payment_model: PaymentModel,
    /// 区间内排课总时长（小时），仅按课时计薪
    pub hours: f64,
    pub hourly_rate: f64,
    /// 区间内已付学费总额，仅佣金制
    pub commission_base: f64,
    pub commission_percentage: f64,
    pub gross_pay: f64,
    pub expense_reserve: f64,
    pub benefits_reserve: f64,
    pub total_pay: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct PayrollTotals {
    pub gross_pay: f64,
    pub expense_reserve: f64,
    pub benefits_reserve: f64,
    pub total_pay: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct PayrollReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub currency: String,
    pub items: Vec<TeacherPayroll>,
    pub totals: PayrollTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct CommissionSettlement {
    pub id: i64,
    pub business_id: i64,
    pub employee_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub fee_count: i32,
    pub gross_amount: f64,
    pub expense_reserve: f64,
    pub benefits_reserve: f64,
    pub net_amount: f64,
    pub employee_payment_id: Option<i64>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct CreateSettlementRequest {
    pub employee_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// 存储层使用的结算参数，金额已计算好
#[derive(Debug, Clone)]
pub struct NewSettlement {
    pub employee_id: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub fee_ids: Vec<i64>,
    pub gross_amount: f64,
    pub expense_reserve: f64,
    pub benefits_reserve: f64,
    pub net_amount: f64,
    pub created_by: i64,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct SettlementListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub employee_id: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payroll.ts")]
pub struct SettlementListResponse {
    pub items: Vec<CommissionSettlement>,
    pub pagination: PaginationInfo,
}
