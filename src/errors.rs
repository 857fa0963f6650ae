//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_bizdesk_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum BizDeskError {
            $($variant(String),)*
        }

        impl BizDeskError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(BizDeskError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(BizDeskError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(BizDeskError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl BizDeskError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        BizDeskError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_bizdesk_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl BizDeskError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        matches!(self, BizDeskError::Conflict(_))
            || msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for BizDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BizDeskError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for BizDeskError {
    fn from(err: sea_orm::DbErr) -> Self {
        BizDeskError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for BizDeskError {
    fn from(err: std::io::Error) -> Self {
        BizDeskError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for BizDeskError {
    fn from(err: serde_json::Error) -> Self {
        BizDeskError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for BizDeskError {
    fn from(err: chrono::ParseError) -> Self {
        BizDeskError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BizDeskError>;

// 处理函数中可直接用 `?` 传播存储层错误
impl actix_web::ResponseError for BizDeskError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            BizDeskError::Validation(_) | BizDeskError::DateParse(_) => StatusCode::BAD_REQUEST,
            BizDeskError::NotFound(_) => StatusCode::NOT_FOUND,
            BizDeskError::Conflict(_) => StatusCode::CONFLICT,
            BizDeskError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BizDeskError::Authorization(_) => StatusCode::FORBIDDEN,
            _ if self.is_unique_violation() => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use crate::models::{ApiResponse, ErrorCode};
        use actix_web::http::StatusCode;

        let status = self.status_code();
        let (code, message) = match status {
            StatusCode::BAD_REQUEST => (ErrorCode::BadRequest, self.message().to_string()),
            StatusCode::NOT_FOUND => (ErrorCode::NotFound, self.message().to_string()),
            StatusCode::CONFLICT => (ErrorCode::Conflict, self.message().to_string()),
            StatusCode::UNAUTHORIZED => (ErrorCode::Unauthorized, self.message().to_string()),
            StatusCode::FORBIDDEN => (ErrorCode::Forbidden, self.message().to_string()),
            _ => {
                tracing::error!("{} [{}]", self.format_simple(), self.code());
                (
                    ErrorCode::InternalServerError,
                    "Internal server error".to_string(),
                )
            }
        };

        actix_web::HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BizDeskError::cache_connection("test").code(), "E001");
        assert_eq!(BizDeskError::database_config("test").code(), "E003");
        assert_eq!(BizDeskError::validation("test").code(), "E007");
        assert_eq!(BizDeskError::conflict("test").code(), "E010");
        assert_eq!(BizDeskError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            BizDeskError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            BizDeskError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = BizDeskError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = BizDeskError::not_found("Student 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Student 42"));
    }

    #[test]
    fn test_unique_violation_detection() {
        assert!(
            BizDeskError::database_operation("UNIQUE constraint failed: users.username")
                .is_unique_violation()
        );
        assert!(BizDeskError::conflict("enrollment exists").is_unique_violation());
        assert!(!BizDeskError::database_operation("connection reset").is_unique_violation());
    }

    #[test]
    fn test_http_status_mapping() {
        use actix_web::{ResponseError, http::StatusCode};

        assert_eq!(
            BizDeskError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BizDeskError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BizDeskError::database_operation("UNIQUE constraint failed: students.email")
                .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            BizDeskError::database_connection("down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
