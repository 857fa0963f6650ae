pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::employees::{CreateEmployeeRequest, EmployeeListQuery, UpdateEmployeeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_non_negative_amount, validate_percentage};

pub struct EmployeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(EmployeeService);

impl EmployeeService {
    pub async fn list_employees(
        &self,
        query: EmployeeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_employees(self, query, request).await
    }

    pub async fn create_employee(
        &self,
        req: CreateEmployeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_employee(self, req, request).await
    }

    pub async fn get_employee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_employee(self, id, request).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        update: UpdateEmployeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_employee(self, id, update, request).await
    }

    pub async fn delete_employee(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_employee(self, id, request).await
    }
}

/// 费率与联系方式校验
pub(crate) fn validate_pay_fields(
    email: Option<&str>,
    hourly_rate: Option<f64>,
    commission_percentage: Option<f64>,
) -> Result<(), &'static str> {
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(rate) = hourly_rate {
        validate_non_negative_amount(rate)?;
    }
    if let Some(pct) = commission_percentage {
        validate_percentage(pct)?;
    }
    Ok(())
}

/// 关联账号必须属于同一商户
pub(crate) async fn check_linked_user(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    user_id: Option<i64>,
) -> ActixResult<Option<HttpResponse>> {
    if let Some(user_id) = user_id
        && storage.get_user(business_id, user_id).await?.is_none()
    {
        return Ok(Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Linked user not found",
        ))));
    }
    Ok(None)
}

pub(crate) fn employee_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::EmployeeNotFound,
        "Employee not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pay_fields() {
        assert!(validate_pay_fields(Some("t@example.com"), Some(25.0), Some(40.0)).is_ok());
        assert!(validate_pay_fields(None, Some(-1.0), None).is_err());
        assert!(validate_pay_fields(None, None, Some(100.5)).is_err());
        assert!(validate_pay_fields(Some("nope"), None, None).is_err());
    }
}
