use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::employee_payments::EmployeePaymentListQuery;
use crate::models::users::UserRole;
use crate::services::EmployeePaymentService;
use crate::utils::SafeIDI64;

static EMPLOYEE_PAYMENT_SERVICE: Lazy<EmployeePaymentService> =
    Lazy::new(EmployeePaymentService::new_lazy);

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<EmployeePaymentListQuery>,
) -> ActixResult<HttpResponse> {
    EMPLOYEE_PAYMENT_SERVICE
        .list_payments(query.into_inner(), &req)
        .await
}

pub async fn pay_payment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EMPLOYEE_PAYMENT_SERVICE.pay_payment(id.0, &req).await
}

// 配置路由
pub fn configure_employee_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/employee-payments")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_payments))
            .route("/{id}/pay", web::post().to(pay_payment)),
    );
}
