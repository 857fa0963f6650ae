//! HTTP 路由层
//!
//! 每个领域一个文件，处理函数只做参数提取，业务逻辑委托给对应的 `XxxService`。

pub mod attendance;
pub mod auth;
pub mod business;
pub mod courses;
pub mod employee_payments;
pub mod employees;
pub mod enrollments;
pub mod fees;
pub mod grades;
pub mod health;
pub mod notifications;
pub mod payroll;
pub mod reports;
pub mod restaurant;
pub mod scheduled_payments;
pub mod schedules;
pub mod students;
pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use business::configure_business_routes;
pub use courses::configure_course_routes;
pub use employee_payments::configure_employee_payment_routes;
pub use employees::configure_employee_routes;
pub use enrollments::configure_enrollment_routes;
pub use fees::configure_fee_routes;
pub use grades::configure_grade_routes;
pub use health::configure_health_routes;
pub use notifications::configure_notification_routes;
pub use payroll::configure_payroll_routes;
pub use reports::configure_report_routes;
pub use restaurant::configure_restaurant_routes;
pub use scheduled_payments::configure_scheduled_payment_routes;
pub use schedules::configure_schedule_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_business_routes)
        .configure(configure_user_routes)
        .configure(configure_employee_routes)
        .configure(configure_student_routes)
        .configure(configure_course_routes)
        .configure(configure_schedule_routes)
        .configure(configure_enrollment_routes)
        .configure(configure_attendance_routes)
        .configure(configure_grade_routes)
        .configure(configure_fee_routes)
        .configure(configure_scheduled_payment_routes)
        .configure(configure_payroll_routes)
        .configure(configure_employee_payment_routes)
        .configure(configure_restaurant_routes)
        .configure(configure_notification_routes)
        .configure(configure_report_routes);
}
