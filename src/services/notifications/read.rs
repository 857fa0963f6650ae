use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::Caller;

pub async fn mark_as_read(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    if storage.mark_notification_as_read(caller.user_id, id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification marked as read")))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )))
    }
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let marked_count = storage.mark_all_notifications_as_read(caller.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkAllReadResponse { marked_count },
        "All notifications marked as read",
    )))
}
