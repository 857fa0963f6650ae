use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    /// 通知类型
    #[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
    pub enum NotificationType("通知类型") {
        FeeGenerated => "fee_generated",
        FeePaid => "fee_paid",
        SalaryGenerated => "salary_generated",
        CommissionSettled => "commission_settled",
        System => "system",
    }
}

/// 通知实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub business_id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 存储层使用的新建通知参数
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
}
