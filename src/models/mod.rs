//! 数据模型
//!
//! 按业务领域划分，每个领域包含 `entities`（业务实体）、`requests`（请求体 / 查询参数）
//! 和 `responses`（响应体）。所有对外类型都派生 `ts_rs::TS` 以导出前端类型定义。

#[macro_use]
pub mod common;

pub mod attendance;
pub mod auth;
pub mod businesses;
pub mod courses;
pub mod employee_payments;
pub mod employees;
pub mod enrollments;
pub mod fees;
pub mod grades;
pub mod notifications;
pub mod payroll;
pub mod reports;
pub mod restaurant;
pub mod scheduled_payments;
pub mod students;
pub mod users;

pub use common::{ApiResponse, ExportFormat, PaginationInfo};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用，2xxx 认证，3xxx 组织与人员，4xxx 教学，
/// 5xxx 账务，6xxx 餐饮，7xxx 通知，8xxx 导入导出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1007,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    TokenInvalid = 2002,
    AccountInactive = 2003,

    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameAlreadyExists = 3004,
    UserEmailAlreadyExists = 3005,
    CanNotDeleteCurrentUser = 3006,
    RoleChangeForbidden = 3007,
    LastOwnerRequired = 3008,
    BusinessNotFound = 3100,
    EmployeeNotFound = 3200,
    StudentNotFound = 3300,

    CourseNotFound = 4000,
    ScheduleNotFound = 4001,
    ScheduleDuplicate = 4002,
    RoomConflict = 4003,
    InvalidTimeRange = 4004,
    EnrollmentNotFound = 4100,
    EnrollmentAlreadyExists = 4101,
    CourseFull = 4102,
    GradeNotFound = 4300,

    FeeNotFound = 5000,
    FeeAlreadyPaid = 5001,
    ScheduledPaymentNotFound = 5002,
    EmployeePaymentNotFound = 5003,
    NothingToSettle = 5004,
    InvalidDateRange = 5005,

    TableNotFound = 6000,
    TableNameAlreadyExists = 6001,
    OrderNotFound = 6002,
    OrderNotOpen = 6003,
    OrderItemNotFound = 6004,
    OrderEmpty = 6005,
    ReservationNotFound = 6006,

    NotificationNotFound = 7000,

    ImportFileMissing = 8000,
    ImportFileParseFailed = 8001,
    ImportFileMissingColumn = 8002,
    ImportFileDataInvalid = 8003,
    ExportFailed = 8004,
}

impl ErrorCode {
    /// 响应体 `error` 字段使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::ValidationFailed => "validation_failed",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Conflict => "conflict",
            ErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            ErrorCode::InternalServerError => "internal_server_error",
            ErrorCode::AuthFailed => "auth_failed",
            ErrorCode::RegisterFailed => "register_failed",
            ErrorCode::TokenInvalid => "token_invalid",
            ErrorCode::AccountInactive => "account_inactive",
            ErrorCode::UserNotFound => "user_not_found",
            ErrorCode::UserNameInvalid => "username_invalid",
            ErrorCode::UserEmailInvalid => "email_invalid",
            ErrorCode::UserPasswordInvalid => "password_invalid",
            ErrorCode::UserNameAlreadyExists => "username_already_exists",
            ErrorCode::UserEmailAlreadyExists => "email_already_exists",
            ErrorCode::CanNotDeleteCurrentUser => "cannot_delete_current_user",
            ErrorCode::RoleChangeForbidden => "role_change_forbidden",
            ErrorCode::LastOwnerRequired => "last_owner_required",
            ErrorCode::BusinessNotFound => "business_not_found",
            ErrorCode::EmployeeNotFound => "employee_not_found",
            ErrorCode::StudentNotFound => "student_not_found",
            ErrorCode::CourseNotFound => "course_not_found",
            ErrorCode::ScheduleNotFound => "schedule_not_found",
            ErrorCode::ScheduleDuplicate => "schedule_duplicate",
            ErrorCode::RoomConflict => "room_conflict",
            ErrorCode::InvalidTimeRange => "invalid_time_range",
            ErrorCode::EnrollmentNotFound => "enrollment_not_found",
            ErrorCode::EnrollmentAlreadyExists => "enrollment_already_exists",
            ErrorCode::CourseFull => "course_full",
            ErrorCode::GradeNotFound => "grade_not_found",
            ErrorCode::FeeNotFound => "fee_not_found",
            ErrorCode::FeeAlreadyPaid => "fee_already_paid",
            ErrorCode::ScheduledPaymentNotFound => "scheduled_payment_not_found",
            ErrorCode::EmployeePaymentNotFound => "employee_payment_not_found",
            ErrorCode::NothingToSettle => "nothing_to_settle",
            ErrorCode::InvalidDateRange => "invalid_date_range",
            ErrorCode::TableNotFound => "table_not_found",
            ErrorCode::TableNameAlreadyExists => "table_name_already_exists",
            ErrorCode::OrderNotFound => "order_not_found",
            ErrorCode::OrderNotOpen => "order_not_open",
            ErrorCode::OrderItemNotFound => "order_item_not_found",
            ErrorCode::OrderEmpty => "order_empty",
            ErrorCode::ReservationNotFound => "reservation_not_found",
            ErrorCode::NotificationNotFound => "notification_not_found",
            ErrorCode::ImportFileMissing => "import_file_missing",
            ErrorCode::ImportFileParseFailed => "import_file_parse_failed",
            ErrorCode::ImportFileMissingColumn => "import_file_missing_column",
            ErrorCode::ImportFileDataInvalid => "import_file_data_invalid",
            ErrorCode::ExportFailed => "export_failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::RoomConflict as i32, 4003);
        assert_eq!(ErrorCode::NothingToSettle.as_str(), "nothing_to_settle");
        assert_eq!(ErrorCode::ScheduleDuplicate.to_string(), "schedule_duplicate");
    }
}
