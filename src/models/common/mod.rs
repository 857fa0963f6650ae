#[macro_use]
mod str_enum;

pub mod pagination;
pub mod response;

pub use pagination::{PaginationInfo, normalize_page};
pub use response::ApiResponse;


define_str_enum! {
    /// 导出文件格式
    #[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
    pub enum ExportFormat("导出格式") {
        Xlsx => "xlsx",
        Csv => "csv",
    }
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_enum_parse_and_display() {
        assert_eq!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Xlsx.to_string(), "xlsx");
        assert_eq!(ExportFormat::ALL.len(), 2);
    }

    #[test]
    fn test_str_enum_serde() {
        let json = serde_json::to_string(&ExportFormat::Csv).unwrap();
        assert_eq!(json, "\"csv\"");
        let parsed: ExportFormat = serde_json::from_str("\"xlsx\"").unwrap();
        assert_eq!(parsed, ExportFormat::Xlsx);

        let err = serde_json::from_str::<ExportFormat>("\"pdf\"").unwrap_err();
        assert!(err.to_string().contains("xlsx, csv"));
    }
}
