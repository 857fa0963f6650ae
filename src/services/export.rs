//! 表格导出（CSV / XLSX）

use actix_web::{HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use crate::errors::BizDeskError;
use crate::models::ExportFormat;

pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

impl Cell {
    fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// 一张待导出的表
pub struct Sheet {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

pub fn render_csv(sheet: &Sheet) -> Result<Vec<u8>, BizDeskError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(sheet.headers)
        .map_err(|e| BizDeskError::serialization(format!("CSV 写入失败: {e}")))?;
    for row in &sheet.rows {
        wtr.write_record(row.iter().map(Cell::as_text))
            .map_err(|e| BizDeskError::serialization(format!("CSV 写入失败: {e}")))?;
    }
    wtr.into_inner()
        .map_err(|e| BizDeskError::serialization(format!("CSV 生成失败: {e}")))
}

pub fn render_xlsx(sheet: &Sheet) -> Result<Vec<u8>, BizDeskError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| {
        BizDeskError::serialization(format!("XLSX 写入失败: {e}"))
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name).map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s).map_err(xlsx_err)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n).map_err(xlsx_err)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// 生成下载响应，文件名为 `{base_name}.{ext}`
pub fn file_response(
    format: ExportFormat,
    base_name: &str,
    sheet: &Sheet,
) -> ActixResult<HttpResponse> {
    let body = match format {
        ExportFormat::Csv => render_csv(sheet),
        ExportFormat::Xlsx => render_xlsx(sheet),
    }
    .map_err(|e| {
        error!("Export {} failed: {}", base_name, e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            "Content-Disposition",
            format!(
                "attachment; filename=\"{base_name}.{}\"",
                format.extension()
            ),
        ))
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sheet {
        Sheet {
            name: "Fees",
            headers: &["id", "student", "amount"],
            rows: vec![
                vec![1_i64.into(), "Ana, Jr.".into(), 12.5.into()],
                vec![2_i64.into(), Cell::from(None::<String>), 0.0.into()],
            ],
        }
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let data = String::from_utf8(render_csv(&sample()).unwrap()).unwrap();
        let lines: Vec<&str> = data.lines().collect();
        assert_eq!(lines[0], "id,student,amount");
        assert_eq!(lines[1], "1,\"Ana, Jr.\",12.5");
        assert_eq!(lines[2], "2,,0");
    }

    #[test]
    fn test_render_xlsx_produces_zip() {
        let data = render_xlsx(&sample()).unwrap();
        assert!(data.starts_with(b"PK"));
    }
}
