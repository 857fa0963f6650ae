//! 学员导入
//!
//! 接受 multipart 中名为 `file` 的字段，按扩展名解析 CSV 或 XLSX。
//! 表头不区分大小写，`name` 为必需列，`email` / `phone` / `guardian_name` 可选。
//! 单行失败不影响其他行，失败原因逐行返回。

use std::collections::HashMap;
use std::io::Cursor;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use tracing::{error, info};

use super::{StudentService, normalize_student};
use crate::config::AppConfig;
use crate::models::students::{CreateStudentRequest, ImportRowError, StudentImportResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::Caller;

enum ImportParseError {
    MissingColumn(&'static str),
    ParseFailed(String),
    EmptyFile,
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("Missing required column: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "The file contains no data".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct ImportRow {
    row_num: usize,
    name: String,
    email: String,
    phone: String,
    guardian_name: String,
}

impl ImportRow {
    fn into_request(self) -> CreateStudentRequest {
        let optional = |s: String| Some(s).filter(|s| !s.is_empty());
        CreateStudentRequest {
            name: self.name,
            email: optional(self.email),
            phone: optional(self.phone),
            guardian_name: optional(self.guardian_name),
        }
    }
}

/// 列位置
struct Columns {
    name: usize,
    email: Option<usize>,
    phone: Option<usize>,
    guardian_name: Option<usize>,
}

impl Columns {
    fn from_headers<I: IntoIterator<Item = String>>(headers: I) -> Result<Self, ImportParseError> {
        let map: HashMap<String, usize> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();
        Ok(Self {
            name: *map
                .get("name")
                .ok_or(ImportParseError::MissingColumn("name"))?,
            email: map.get("email").copied(),
            phone: map.get("phone").copied(),
            guardian_name: map.get("guardian_name").copied(),
        })
    }

    fn row(&self, row_num: usize, get: impl Fn(usize) -> String) -> ImportRow {
        let optional = |idx: Option<usize>| idx.map(&get).unwrap_or_default();
        ImportRow {
            row_num,
            name: get(self.name),
            email: optional(self.email),
            phone: optional(self.phone),
            guardian_name: optional(self.guardian_name),
        }
    }
}

pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = Caller::from_request(request)?;
    let max_rows = AppConfig::get().server.limits.max_import_rows;

    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ImportFileMissing, e)));
        }
    };

    let parsed = if file_name.to_lowercase().ends_with(".xlsx") {
        parse_xlsx(&file_bytes)
    } else {
        parse_csv(&file_bytes)
    };
    let rows = match parsed {
        Ok(rows) if rows.is_empty() => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileDataInvalid,
                "The file contains no data rows",
            )));
        }
        Ok(rows) => rows,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    if rows.len() > max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("At most {max_rows} rows can be imported at once"),
        )));
    }

    let storage = service.get_storage(request)?;
    let total = rows.len();
    let mut created = 0;
    let mut errors: Vec<ImportRowError> = Vec::new();

    for row in rows {
        let row_num = row.row_num;
        let mut req = row.into_request();
        if let Err(msg) = normalize_student(&mut req) {
            errors.push(ImportRowError {
                row: row_num,
                message: msg.to_string(),
            });
            continue;
        }

        match storage.create_student(caller.business_id, req).await {
            Ok(_) => created += 1,
            Err(e) => {
                error!("Failed to import student row {}: {}", row_num, e);
                errors.push(ImportRowError {
                    row: row_num,
                    message: format!("Failed to create student: {}", e.message()),
                });
            }
        }
    }

    info!(
        "Student import into business {}: {} of {} rows created",
        caller.business_id, created, total
    );

    let response = StudentImportResponse {
        total,
        created,
        failed: errors.len(),
        errors,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Failed to read multipart field: {e}"))?;

        if field.name() == Some("file") {
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("Failed to read file data: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("No file field found in the upload".to_string());
    }

    Ok((file_bytes, file_name))
}

fn parse_csv(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to read header: {e}")))?;
    let columns = Columns::from_headers(headers.iter().map(str::to_string))?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("Failed to parse row {}: {e}", idx + 2))
        })?;
        // 跳过空行
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(columns.row(idx + 2, |i| {
            record.get(i).unwrap_or("").trim().to_string()
        }));
    }
    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to open XLSX: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportParseError::ParseFailed("Workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to read sheet: {e}")))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let columns = Columns::from_headers(header_row.iter().map(|c| c.to_string()))?;

    let mut rows = Vec::new();
    for (idx, row) in rows_iter.enumerate() {
        let get_cell = |i: usize| {
            row.get(i)
                .map(|c| c.to_string().trim().to_string())
                .unwrap_or_default()
        };
        if (0..row.len()).all(|i| get_cell(i).is_empty()) {
            continue;
        }
        rows.push(columns.row(idx + 2, get_cell));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_maps_columns_case_insensitively() {
        let data = b"Phone,NAME,Email\n555-0100, Ada ,ada@example.com\n,,\n,Bob,\n";
        let rows = match parse_csv(data) {
            Ok(rows) => rows,
            Err(e) => panic!("parse failed: {}", e.message()),
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_num, 2);
        assert_eq!(rows[0].name, "Ada");
        assert_eq!(rows[0].phone, "555-0100");
        assert_eq!(rows[0].guardian_name, "");
        assert_eq!(rows[1].row_num, 4);
        assert_eq!(rows[1].name, "Bob");
        assert_eq!(rows[1].email, "");
    }

    #[test]
    fn test_parse_csv_requires_name_column() {
        let data = b"email,phone\nx@example.com,1\n";
        match parse_csv(data) {
            Err(ImportParseError::MissingColumn(col)) => assert_eq!(col, "name"),
            _ => panic!("expected missing column error"),
        }
    }

    #[test]
    fn test_parse_xlsx_round_trip_from_writer() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(0, 1, "guardian_name").unwrap();
        sheet.write_string(1, 0, "Lena").unwrap();
        sheet.write_string(1, 1, "Maria").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = match parse_xlsx(&bytes) {
            Ok(rows) => rows,
            Err(e) => panic!("parse failed: {}", e.message()),
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Lena");
        let req = rows[0].clone().into_request();
        assert_eq!(req.guardian_name.as_deref(), Some("Maria"));
        assert_eq!(req.email, None);
    }

}
