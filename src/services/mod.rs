//! 业务服务层
//!
//! 每个领域一个 `XxxService`，持有可选的注入存储；未注入时从请求的 `app_data` 取得。
//! 每个操作一个文件。

use std::sync::Arc;

use actix_web::{HttpRequest, Result as ActixResult, web};

use crate::errors::BizDeskError;
use crate::middlewares::RequireJWT;
use crate::models::users::UserRole;
use crate::storage::Storage;

/// 生成 `new_lazy` / `with_storage` / `get_storage`
macro_rules! impl_storage_service {
    ($service:ident) => {
        impl $service {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub fn with_storage(storage: std::sync::Arc<dyn $crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn $crate::storage::Storage>> {
                $crate::services::resolve_storage(self.storage.as_ref(), request)
            }
        }
    };
}

pub mod attendance;
pub mod auth;
pub mod business;
pub mod courses;
pub mod employee_payments;
pub mod employees;
pub mod enrollments;
pub mod export;
pub mod fees;
pub mod grades;
pub mod notifications;
pub mod payroll;
pub mod reports;
pub mod restaurant;
pub mod scheduled_payments;
pub mod schedules;
pub mod students;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use business::BusinessService;
pub use courses::CourseService;
pub use employee_payments::EmployeePaymentService;
pub use employees::EmployeeService;
pub use enrollments::EnrollmentService;
pub use fees::FeeService;
pub use grades::GradeService;
pub use notifications::NotificationService;
pub use payroll::PayrollService;
pub use reports::ReportService;
pub use restaurant::RestaurantService;
pub use scheduled_payments::ScheduledPaymentService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use users::UserService;

pub(crate) fn resolve_storage(
    injected: Option<&Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = injected {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage is not registered in app data");
            BizDeskError::database_connection("Storage not available").into()
        })
}

/// 当前调用者
#[derive(Debug, Clone, Copy)]
pub(crate) struct Caller {
    pub user_id: i64,
    pub business_id: i64,
    pub role: UserRole,
}

impl Caller {
    pub fn from_request(request: &HttpRequest) -> ActixResult<Self> {
        RequireJWT::extract_user(request)
            .map(|user| Caller {
                user_id: user.id,
                business_id: user.business_id,
                role: user.role,
            })
            .ok_or_else(|| BizDeskError::authentication("Unauthorized: missing user").into())
    }
}
