//! 商户（租户）

use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/business.ts")]
    pub enum BusinessType("商户类型") {
        School => "school",
        Restaurant => "restaurant",
        Retail => "retail",
        Services => "services",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/business.ts")]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub business_type: BusinessType,
    pub currency: String,
    /// 佣金的费用预留比例（0-100）
    pub expense_reserve_percentage: f64,
    /// 佣金的福利预留比例（0-100）
    pub benefits_reserve_percentage: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub business_type: BusinessType,
    pub currency: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/business.ts")]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub business_type: Option<BusinessType>,
    pub currency: Option<String>,
    pub expense_reserve_percentage: Option<f64>,
    pub benefits_reserve_percentage: Option<f64>,
}
