//! 员工付款记录

use crate::models::common::PaginationInfo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/employee_payment.ts")]
    pub enum EmployeePaymentKind("付款类型") {
        Salary => "salary",
        Hourly => "hourly",
        Commission => "commission",
    }
}

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/employee_payment.ts")]
    pub enum EmployeePaymentStatus("付款状态") {
        Pending => "pending",
        Paid => "paid",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee_payment.ts")]
pub struct EmployeePayment {
    pub id: i64,
    pub business_id: i64,
    pub employee_id: i64,
    pub scheduled_payment_id: Option<i64>,
    pub settlement_id: Option<i64>,
    pub kind: EmployeePaymentKind,
    pub description: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub status: EmployeePaymentStatus,
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 存储层使用的新建付款参数
#[derive(Debug, Clone)]
pub struct NewEmployeePayment {
    pub employee_id: i64,
    pub scheduled_payment_id: Option<i64>,
    pub kind: EmployeePaymentKind,
    pub description: String,
    pub amount: f64,
    pub payment_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee_payment.ts")]
pub struct EmployeePaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub employee_id: Option<i64>,
    pub kind: Option<EmployeePaymentKind>,
    pub status: Option<EmployeePaymentStatus>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee_payment.ts")]
pub struct EmployeePaymentListResponse {
    pub items: Vec<EmployeePayment>,
    pub pagination: PaginationInfo,
}
