pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::{
    CreateStudentRequest, StudentExportQuery, StudentListQuery, UpdateStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_email;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, update, request).await
    }

    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    // 从 CSV / XLSX 批量导入
    pub async fn import_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, payload, request).await
    }

    pub async fn export_students(
        &self,
        query: StudentExportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_students(self, query, request).await
    }
}

/// 规范化并校验学员字段，空字符串视为未填写
pub(crate) fn normalize_student(req: &mut CreateStudentRequest) -> Result<(), &'static str> {
    req.name = req.name.trim().to_string();
    if req.name.is_empty() {
        return Err("Student name is required");
    }
    for field in [&mut req.email, &mut req.phone, &mut req.guardian_name] {
        *field = field
            .take()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }
    if let Some(email) = req.email.as_mut() {
        *email = email.to_lowercase();
        validate_email(email)?;
    }
    Ok(())
}

pub(crate) fn student_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::StudentNotFound,
        "Student not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_student() {
        let mut req = CreateStudentRequest {
            name: "  Mia Chen ".to_string(),
            email: Some(" Mia@Example.com ".to_string()),
            phone: Some("   ".to_string()),
            guardian_name: None,
        };
        assert!(normalize_student(&mut req).is_ok());
        assert_eq!(req.name, "Mia Chen");
        assert_eq!(req.email.as_deref(), Some("mia@example.com"));
        assert_eq!(req.phone, None);

        let mut blank = CreateStudentRequest {
            name: " ".to_string(),
            email: None,
            phone: None,
            guardian_name: None,
        };
        assert!(normalize_student(&mut blank).is_err());
    }
}
