pub mod list;
pub mod pay;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::employee_payments::EmployeePaymentListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct EmployeePaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(EmployeePaymentService);

impl EmployeePaymentService {
    pub async fn list_payments(
        &self,
        query: EmployeePaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, query, request).await
    }

    pub async fn pay_payment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        pay::pay_payment(self, id, request).await
    }
}

pub(crate) fn employee_payment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::EmployeePaymentNotFound,
        "Employee payment not found",
    ))
}
