pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::businesses::UpdateBusinessRequest;
use crate::storage::Storage;

pub struct BusinessService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(BusinessService);

impl BusinessService {
    // 当前商户信息
    pub async fn get_business(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_business(self, request).await
    }

    // 更新商户设置
    pub async fn update_business(
        &self,
        update: UpdateBusinessRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_business(self, update, request).await
    }
}
