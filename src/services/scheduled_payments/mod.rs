pub mod create;
pub mod delete;
pub mod list;
pub mod preview;
pub mod process;
pub mod recurrence;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::scheduled_payments::{
    CreateScheduledPaymentRequest, PreviewQuery, ProcessScheduledPaymentsRequest,
    ScheduledPaymentListQuery, UpdateScheduledPaymentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ScheduledPaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(ScheduledPaymentService);

impl ScheduledPaymentService {
    pub async fn list_scheduled_payments(
        &self,
        query: ScheduledPaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_scheduled_payments(self, query, request).await
    }

    pub async fn create_scheduled_payment(
        &self,
        req: CreateScheduledPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_scheduled_payment(self, req, request).await
    }

    pub async fn update_scheduled_payment(
        &self,
        id: i64,
        update: UpdateScheduledPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_scheduled_payment(self, id, update, request).await
    }

    pub async fn delete_scheduled_payment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_scheduled_payment(self, id, request).await
    }

    // 列出接下来的执行日期
    pub async fn preview(
        &self,
        id: i64,
        query: PreviewQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        preview::preview(self, id, query, request).await
    }

    // 执行所有到期规则（含补跑）
    pub async fn process_due(
        &self,
        req: ProcessScheduledPaymentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        process::process_due(self, req, request).await
    }
}

fn validate_day_of_month(day_of_month: Option<u32>) -> Result<(), &'static str> {
    match day_of_month {
        Some(day) if !(1..=31).contains(&day) => Err("Day of month must be between 1 and 31"),
        _ => Ok(()),
    }
}

pub(crate) fn scheduled_payment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ScheduledPaymentNotFound,
        "Scheduled payment not found",
    ))
}

fn bad_request(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))
}
