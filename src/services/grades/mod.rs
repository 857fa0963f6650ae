pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(GradeService);

impl GradeService {
    pub async fn list_grades(
        &self,
        query: GradeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn create_grade(
        &self,
        req: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, req, request).await
    }

    pub async fn update_grade(
        &self,
        id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, id, update, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id, request).await
    }
}

/// 0 <= score <= max_score，max_score > 0
pub(crate) fn validate_score(score: f64, max_score: f64) -> Result<(), &'static str> {
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err("Max score must be greater than zero");
    }
    if !score.is_finite() || score < 0.0 {
        return Err("Score cannot be negative");
    }
    if score > max_score {
        return Err("Score cannot exceed max score");
    }
    Ok(())
}

pub(crate) fn grade_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradeNotFound,
        "Grade not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_score() {
        assert!(validate_score(85.0, 100.0).is_ok());
        assert!(validate_score(100.0, 100.0).is_ok());
        assert!(validate_score(0.0, 10.0).is_ok());
        assert!(validate_score(10.5, 10.0).is_err());
        assert!(validate_score(-1.0, 10.0).is_err());
        assert!(validate_score(5.0, 0.0).is_err());
    }
}
