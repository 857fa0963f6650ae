use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PayrollService, build_report, check_range};
use crate::models::ExportFormat;
use crate::models::payroll::{PayrollExportQuery, PayrollReport};
use crate::services::Caller;
use crate::services::export::{Cell, Sheet, file_response};

const HEADERS: &[&str] = &[
    "employee_id",
    "name",
    "payment_model",
    "hours",
    "hourly_rate",
    "commission_base",
    "commission_percentage",
    "gross_pay",
    "expense_reserve",
    "benefits_reserve",
    "total_pay",
];

fn payroll_sheet(report: PayrollReport) -> Sheet {
    let mut rows: Vec<Vec<Cell>> = report
        .items
        .into_iter()
        .map(|p| {
            vec![
                Cell::from(p.employee_id),
                Cell::from(p.name),
                Cell::from(p.payment_model.as_str()),
                Cell::from(p.hours),
                Cell::from(p.hourly_rate),
                Cell::from(p.commission_base),
                Cell::from(p.commission_percentage),
                Cell::from(p.gross_pay),
                Cell::from(p.expense_reserve),
                Cell::from(p.benefits_reserve),
                Cell::from(p.total_pay),
            ]
        })
        .collect();

    // 合计行
    let totals = report.totals;
    rows.push(vec![
        Cell::Empty,
        Cell::from("TOTAL"),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::from(totals.gross_pay),
        Cell::from(totals.expense_reserve),
        Cell::from(totals.benefits_reserve),
        Cell::from(totals.total_pay),
    ]);

    Sheet {
        name: "Payroll",
        headers: HEADERS,
        rows,
    }
}

pub async fn export_report(
    service: &PayrollService,
    query: PayrollExportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    if let Some(resp) = check_range(query.start, query.end) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    let report = build_report(&storage, caller.business_id, query.start, query.end).await?;
    let file_name = format!("payroll_{}_{}", query.start, query.end);
    file_response(
        query.format.unwrap_or(ExportFormat::Xlsx),
        &file_name,
        &payroll_sheet(report),
    )
}
