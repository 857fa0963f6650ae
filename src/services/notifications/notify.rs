//! 尽力而为的通知写入
//!
//! 在主操作成功之后调用，失败只记录 `warn!`，不影响请求结果。

use std::sync::Arc;

use tracing::warn;

use crate::models::notifications::{NewNotification, NotificationType};
use crate::models::users::UserRole;
use crate::storage::Storage;

pub async fn notify_user(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    user_id: i64,
    notification_type: NotificationType,
    title: &str,
    content: Option<String>,
) {
    let notification = NewNotification {
        user_id,
        notification_type,
        title: title.to_string(),
        content,
    };
    if let Err(e) = storage.create_notification(business_id, notification).await {
        warn!(
            "Failed to create {} notification for user {}: {}",
            notification_type, user_id, e
        );
    }
}

/// 通知商户内拥有指定角色的所有活跃用户
pub async fn notify_roles(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    roles: &[UserRole],
    notification_type: NotificationType,
    title: &str,
    content: Option<String>,
) {
    let recipients = match storage.list_users_by_roles(business_id, roles).await {
        Ok(users) => users,
        Err(e) => {
            warn!(
                "Failed to resolve {} notification recipients in business {}: {}",
                notification_type, business_id, e
            );
            return;
        }
    };
    for user in recipients {
        notify_user(
            storage,
            business_id,
            user.id,
            notification_type,
            title,
            content.clone(),
        )
        .await;
    }
}
