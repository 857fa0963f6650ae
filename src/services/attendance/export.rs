use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::config::AppConfig;
use crate::models::ExportFormat;
use crate::models::attendance::{Attendance, AttendanceExportQuery};
use crate::services::Caller;
use crate::services::export::{Cell, Sheet, file_response};

const HEADERS: &[&str] = &[
    "id",
    "student_id",
    "course_id",
    "date",
    "status",
    "notes",
    "recorded_by",
];

fn attendance_sheet(rows: Vec<Attendance>) -> Sheet {
    Sheet {
        name: "Attendance",
        headers: HEADERS,
        rows: rows
            .into_iter()
            .map(|a| {
                vec![
                    Cell::from(a.id),
                    Cell::from(a.student_id),
                    Cell::from(a.course_id),
                    Cell::from(a.date.to_string()),
                    Cell::from(a.status.as_str()),
                    Cell::from(a.notes),
                    Cell::from(a.recorded_by),
                ]
            })
            .collect(),
    }
}

pub async fn export_attendance(
    service: &AttendanceService,
    query: AttendanceExportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;
    let limit = AppConfig::get().server.limits.max_export_rows;

    let format = query.format.unwrap_or(ExportFormat::Csv);
    let rows = storage
        .list_attendance_for_export(caller.business_id, query, limit)
        .await?;
    file_response(format, "attendance", &attendance_sheet(rows))
}
