//! 定期付款规则

use crate::models::common::PaginationInfo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
    pub enum Recurrence("重复周期") {
        Daily => "daily",
        Weekly => "weekly",
        Biweekly => "biweekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

define_str_enum! {
    // 生成对象：学费或员工薪资
    #[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
    pub enum PaymentTarget("付款对象") {
        StudentFee => "student_fee",
        EmployeeSalary => "employee_salary",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct ScheduledPayment {
    pub id: i64,
    pub business_id: i64,
    pub target: PaymentTarget,
    pub student_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub course_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub recurrence: Recurrence,
    /// 仅对按月重复生效，1-31，超出当月天数时取月末
    pub day_of_month: Option<u32>,
    pub next_run_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub last_run_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct CreateScheduledPaymentRequest {
    pub target: PaymentTarget,
    pub student_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub course_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub recurrence: Recurrence,
    pub day_of_month: Option<u32>,
    /// 第一次生成的日期
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct UpdateScheduledPaymentRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub recurrence: Option<Recurrence>,
    pub day_of_month: Option<u32>,
    pub next_run_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct ScheduledPaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub target: Option<PaymentTarget>,
    pub is_active: Option<bool>,
    pub student_id: Option<i64>,
    pub employee_id: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct ScheduledPaymentListResponse {
    pub items: Vec<ScheduledPayment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct ProcessScheduledPaymentsRequest {
    /// 缺省为当天（UTC）
    pub as_of: Option<NaiveDate>,
}

/// 单条规则的执行结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct ScheduleRunResult {
    pub scheduled_payment_id: i64,
    pub generated: u32,
    pub next_run_date: NaiveDate,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct ProcessScheduledPaymentsResponse {
    pub as_of: NaiveDate,
    pub total_generated: u32,
    pub results: Vec<ScheduleRunResult>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct PreviewQuery {
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduled_payment.ts")]
pub struct PreviewResponse {
    pub scheduled_payment_id: i64,
    pub dates: Vec<NaiveDate>,
}

/// 单条规则一次执行要写入的结果，由存储层在一个事务内落库
#[derive(Debug, Clone)]
pub struct ScheduledPaymentRun {
    pub scheduled_payment_id: i64,
    /// 执行前读取到的 next_run_date，用于检测并发执行
    pub expected_next_run_date: NaiveDate,
    pub fees: Vec<crate::models::fees::NewStudentFee>,
    pub employee_payments: Vec<crate::models::employee_payments::NewEmployeePayment>,
    pub last_run_date: Option<NaiveDate>,
    pub next_run_date: NaiveDate,
    pub is_active: bool,
}
