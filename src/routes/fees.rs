use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::fees::{
    CreateFeeRequest, FeeExportQuery, FeeListQuery, PayFeeRequest, UpdateFeeRequest,
};
use crate::models::users::UserRole;
use crate::services::FeeService;
use crate::utils::SafeIDI64;

static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<FeeListQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_fees(query.into_inner(), &req).await
}

pub async fn create_fee(
    req: HttpRequest,
    fee_data: web::Json<CreateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_fee(fee_data.into_inner(), &req).await
}

pub async fn update_fee(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .update_fee(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn pay_fee(
    req: HttpRequest,
    id: SafeIDI64,
    pay_data: web::Json<PayFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.pay_fee(id.0, pay_data.into_inner(), &req).await
}

pub async fn delete_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_fee(id.0, &req).await
}

pub async fn export_fees(
    req: HttpRequest,
    query: web::Query<FeeExportQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.export_fees(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student-fees")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_fees))
            .route("", web::post().to(create_fee))
            .route("/export", web::get().to(export_fees))
            .route("/{id}", web::put().to(update_fee))
            .route("/{id}", web::delete().to(delete_fee))
            .route("/{id}/pay", web::post().to(pay_fee)),
    );
}
