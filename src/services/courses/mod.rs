pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_non_negative_amount;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(CourseService);

impl CourseService {
    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    // 创建课程，可同时创建排课
    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, req, request).await
    }

    // 课程详情（含排课与在读人数）
    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_course(self, id, request).await
    }

    pub async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, id, update, request).await
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, id, request).await
    }
}

pub(crate) fn validate_course_fields(
    monthly_fee: Option<f64>,
    capacity: Option<i32>,
) -> Result<(), &'static str> {
    if let Some(fee) = monthly_fee {
        validate_non_negative_amount(fee)?;
    }
    if capacity.is_some_and(|c| c < 1) {
        return Err("Capacity must be at least 1");
    }
    Ok(())
}

/// 授课员工必须属于同一商户
pub(crate) async fn check_teacher(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    teacher_id: Option<i64>,
) -> ActixResult<Option<HttpResponse>> {
    if let Some(teacher_id) = teacher_id
        && storage.get_employee(business_id, teacher_id).await?.is_none()
    {
        return Ok(Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EmployeeNotFound,
            "Teacher not found",
        ))));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_course_fields() {
        assert!(validate_course_fields(Some(120.0), Some(12)).is_ok());
        assert!(validate_course_fields(None, None).is_ok());
        assert!(validate_course_fields(Some(-5.0), None).is_err());
        assert!(validate_course_fields(None, Some(0)).is_err());
    }
}
