pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::Course;
use crate::models::enrollments::{
    CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(EnrollmentService);

impl EnrollmentService {
    pub async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, query, request).await
    }

    pub async fn create_enrollment(
        &self,
        req: CreateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_enrollment(self, req, request).await
    }

    pub async fn update_enrollment(
        &self,
        id: i64,
        req: UpdateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment(self, id, req, request).await
    }

    pub async fn delete_enrollment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_enrollment(self, id, request).await
    }
}

/// 课程满员时返回 409
pub(crate) async fn check_capacity(
    storage: &Arc<dyn Storage>,
    business_id: i64,
    course: &Course,
) -> ActixResult<Option<HttpResponse>> {
    let Some(capacity) = course.capacity else {
        return Ok(None);
    };
    let active = storage
        .count_active_enrollments(business_id, course.id)
        .await?;
    if active >= capacity.max(0) as u64 {
        return Ok(Some(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseFull,
            format!("Course is full ({capacity} seats)"),
        ))));
    }
    Ok(None)
}

pub(crate) fn enrollment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::EnrollmentNotFound,
        "Enrollment not found",
    ))
}
