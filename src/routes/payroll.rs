use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payroll::{
    CreateSettlementRequest, PayrollExportQuery, PayrollQuery, SettlementListQuery,
};
use crate::models::users::UserRole;
use crate::services::PayrollService;

static PAYROLL_SERVICE: Lazy<PayrollService> = Lazy::new(PayrollService::new_lazy);

pub async fn get_payroll(
    req: HttpRequest,
    query: web::Query<PayrollQuery>,
) -> ActixResult<HttpResponse> {
    PAYROLL_SERVICE.get_report(query.into_inner(), &req).await
}

pub async fn export_payroll(
    req: HttpRequest,
    query: web::Query<PayrollExportQuery>,
) -> ActixResult<HttpResponse> {
    PAYROLL_SERVICE.export_report(query.into_inner(), &req).await
}

pub async fn list_settlements(
    req: HttpRequest,
    query: web::Query<SettlementListQuery>,
) -> ActixResult<HttpResponse> {
    PAYROLL_SERVICE
        .list_settlements(query.into_inner(), &req)
        .await
}

pub async fn create_settlement(
    req: HttpRequest,
    settlement_data: web::Json<CreateSettlementRequest>,
) -> ActixResult<HttpResponse> {
    PAYROLL_SERVICE
        .create_settlement(settlement_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_payroll_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payroll")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_payroll))
            .route("/export", web::get().to(export_payroll))
            .route("/settlements", web::get().to(list_settlements))
            .route("/settlements", web::post().to(create_settlement)),
    );
}
