pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod pay;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::fees::{
    CreateFeeRequest, FeeExportQuery, FeeListQuery, PayFeeRequest, UpdateFeeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct FeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(FeeService);

impl FeeService {
    // 列表前先把到期未付的学费标记为逾期
    pub async fn list_fees(
        &self,
        query: FeeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_fees(self, query, request).await
    }

    pub async fn create_fee(
        &self,
        req: CreateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_fee(self, req, request).await
    }

    pub async fn update_fee(
        &self,
        id: i64,
        update: UpdateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_fee(self, id, update, request).await
    }

    // 登记缴费
    pub async fn pay_fee(
        &self,
        id: i64,
        req: PayFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pay::pay_fee(self, id, req, request).await
    }

    pub async fn delete_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_fee(self, id, request).await
    }

    pub async fn export_fees(
        &self,
        query: FeeExportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_fees(self, query, request).await
    }
}

pub(crate) fn fee_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FeeNotFound,
        "Fee not found",
    ))
}

pub(crate) fn fee_already_paid() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::FeeAlreadyPaid,
        "Fee has already been paid",
    ))
}
