//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 日期列以 `YYYY-MM-DD` 字符串保存，时间戳为 Unix 秒。

pub mod prelude;

pub mod attendance;
pub mod businesses;
pub mod class_schedules;
pub mod commission_settlements;
pub mod courses;
pub mod dining_tables;
pub mod employee_payments;
pub mod employees;
pub mod enrollments;
pub mod grades;
pub mod notifications;
pub mod order_items;
pub mod orders;
pub mod reservations;
pub mod scheduled_payments;
pub mod student_fees;
pub mod students;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap_or_default()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_column_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date), "2025-03-07");
        assert_eq!(parse_date("2025-03-07"), date);
        assert_eq!(parse_date("garbage"), NaiveDate::default());
    }

    #[test]
    fn test_timestamp_conversion() {
        assert_eq!(to_datetime(0).timestamp(), 0);
        assert_eq!(to_datetime(1_700_000_000).timestamp(), 1_700_000_000);
    }
}
