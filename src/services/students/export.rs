//! 学员导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::config::AppConfig;
use crate::models::students::{Student, StudentExportQuery};
use crate::models::ExportFormat;
use crate::services::Caller;
use crate::services::export::{Cell, Sheet, file_response};

const HEADERS: &[&str] = &[
    "id",
    "name",
    "email",
    "phone",
    "guardian_name",
    "status",
    "created_at",
];

fn student_sheet(students: Vec<Student>) -> Sheet {
    let rows = students
        .into_iter()
        .map(|s| {
            vec![
                Cell::from(s.id),
                Cell::from(s.name),
                Cell::from(s.email),
                Cell::from(s.phone),
                Cell::from(s.guardian_name),
                Cell::from(s.status.as_str()),
                Cell::from(s.created_at.to_rfc3339()),
            ]
        })
        .collect();
    Sheet {
        name: "Students",
        headers: HEADERS,
        rows,
    }
}

pub async fn export_students(
    service: &StudentService,
    query: StudentExportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;
    let limit = AppConfig::get().server.limits.max_export_rows;

    let students = storage
        .list_students_for_export(caller.business_id, query.status, limit)
        .await?;
    let format = query.format.unwrap_or(ExportFormat::Csv);
    file_response(format, "students", &student_sheet(students))
}
