pub mod count;
pub mod list;
pub mod notify;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::NotificationListQuery;
use crate::storage::Storage;

pub use notify::{notify_roles, notify_user};

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(NotificationService);

impl NotificationService {
    pub async fn list_notifications(
        &self,
        query: NotificationListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, query, request).await
    }

    pub async fn get_unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        count::get_unread_count(self, request).await
    }

    pub async fn mark_as_read(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::mark_as_read(self, id, request).await
    }

    pub async fn mark_all_as_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::mark_all_as_read(self, request).await
    }
}
