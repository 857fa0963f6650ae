use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::config::AppConfig;
use crate::models::ExportFormat;
use crate::models::fees::{FeeExportQuery, StudentFee};
use crate::services::Caller;
use crate::services::export::{Cell, Sheet, file_response};

const HEADERS: &[&str] = &[
    "id",
    "student_id",
    "course_id",
    "description",
    "amount",
    "due_date",
    "status",
    "paid_at",
    "payment_method",
];

fn fee_sheet(fees: Vec<StudentFee>) -> Sheet {
    Sheet {
        name: "Fees",
        headers: HEADERS,
        rows: fees
            .into_iter()
            .map(|f| {
                vec![
                    Cell::from(f.id),
                    Cell::from(f.student_id),
                    Cell::from(f.course_id),
                    Cell::from(f.description),
                    Cell::from(f.amount),
                    Cell::from(f.due_date.to_string()),
                    Cell::from(f.status.as_str()),
                    Cell::from(f.paid_at.map(|t| t.to_rfc3339())),
                    Cell::from(f.payment_method.map(|m| m.as_str())),
                ]
            })
            .collect(),
    }
}

pub async fn export_fees(
    service: &FeeService,
    query: FeeExportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let storage = service.get_storage(request)?;
    let limit = AppConfig::get().server.limits.max_export_rows;

    let today = chrono::Utc::now().date_naive();
    storage.mark_overdue_fees(caller.business_id, today).await?;

    let format = query.format.unwrap_or(ExportFormat::Csv);
    let fees = storage
        .list_fees_for_export(caller.business_id, query, limit)
        .await?;
    file_response(format, "student_fees", &fee_sheet(fees))
}
