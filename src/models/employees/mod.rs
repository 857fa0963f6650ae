//! 员工

use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    // 薪酬模式
    #[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
    pub enum PaymentModel("薪酬模式") {
        Hourly => "hourly",         // 按课时
        Commission => "commission", // 按学费提成
    }
}

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
    pub enum EmployeeStatus("员工状态") {
        Active => "active",
        Inactive => "inactive",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct Employee {
    pub id: i64,
    pub business_id: i64,
    /// 关联的登录账号
    pub user_id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub payment_model: PaymentModel,
    pub hourly_rate: f64,
    pub commission_percentage: f64,
    pub status: EmployeeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct CreateEmployeeRequest {
    pub user_id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub payment_model: PaymentModel,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub commission_percentage: f64,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct UpdateEmployeeRequest {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub payment_model: Option<PaymentModel>,
    pub hourly_rate: Option<f64>,
    pub commission_percentage: Option<f64>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct EmployeeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<EmployeeStatus>,
    pub payment_model: Option<PaymentModel>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct EmployeeListResponse {
    pub items: Vec<Employee>,
    pub pagination: PaginationInfo,
}
