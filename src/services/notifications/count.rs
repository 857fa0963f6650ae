use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::UnreadCountResponse;
use crate::services::Caller;

pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;

    let count = storage.get_unread_notification_count(caller.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UnreadCountResponse {
            unread_count: count,
        },
        "Unread count retrieved successfully",
    )))
}
