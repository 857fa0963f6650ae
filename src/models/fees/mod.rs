//! 学费

use crate::models::common::{ExportFormat, PaginationInfo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
    pub enum FeeStatus("学费状态") {
        Pending => "pending",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
    pub enum PaymentMethod("支付方式") {
        Cash => "cash",
        Card => "card",
        Transfer => "transfer",
        Other => "other",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct StudentFee {
    pub id: i64,
    pub business_id: i64,
    pub student_id: i64,
    pub course_id: Option<i64>,
    /// 由定期付款规则生成时的来源
    pub scheduled_payment_id: Option<i64>,
    /// 已计入的佣金结算
    pub settlement_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreateFeeRequest {
    pub student_id: i64,
    pub course_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

/// 存储层使用的新建学费参数
#[derive(Debug, Clone)]
pub struct NewStudentFee {
    pub student_id: i64,
    pub course_id: Option<i64>,
    pub scheduled_payment_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct UpdateFeeRequest {
    pub course_id: Option<i64>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<FeeStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct PayFeeRequest {
    pub payment_method: PaymentMethod,
    /// 缺省为当前时间
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<FeeStatus>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeExportQuery {
    pub format: Option<ExportFormat>,
    pub status: Option<FeeStatus>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeListResponse {
    pub items: Vec<StudentFee>,
    pub pagination: PaginationInfo,
}
