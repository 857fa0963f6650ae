use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::scheduled_payments::{
    CreateScheduledPaymentRequest, PreviewQuery, ProcessScheduledPaymentsRequest,
    ScheduledPaymentListQuery, UpdateScheduledPaymentRequest,
};
use crate::models::users::UserRole;
use crate::services::ScheduledPaymentService;
use crate::utils::SafeIDI64;

static SCHEDULED_PAYMENT_SERVICE: Lazy<ScheduledPaymentService> =
    Lazy::new(ScheduledPaymentService::new_lazy);

pub async fn list_scheduled_payments(
    req: HttpRequest,
    query: web::Query<ScheduledPaymentListQuery>,
) -> ActixResult<HttpResponse> {
    SCHEDULED_PAYMENT_SERVICE
        .list_scheduled_payments(query.into_inner(), &req)
        .await
}

pub async fn create_scheduled_payment(
    req: HttpRequest,
    payment_data: web::Json<CreateScheduledPaymentRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULED_PAYMENT_SERVICE
        .create_scheduled_payment(payment_data.into_inner(), &req)
        .await
}

pub async fn update_scheduled_payment(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateScheduledPaymentRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULED_PAYMENT_SERVICE
        .update_scheduled_payment(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_scheduled_payment(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SCHEDULED_PAYMENT_SERVICE
        .delete_scheduled_payment(id.0, &req)
        .await
}

pub async fn preview_scheduled_payment(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<PreviewQuery>,
) -> ActixResult<HttpResponse> {
    SCHEDULED_PAYMENT_SERVICE
        .preview(id.0, query.into_inner(), &req)
        .await
}

// 请求体可省略
pub async fn process_scheduled_payments(
    req: HttpRequest,
    process_data: Option<web::Json<ProcessScheduledPaymentsRequest>>,
) -> ActixResult<HttpResponse> {
    let process_data = process_data.map(|d| d.into_inner()).unwrap_or_default();
    SCHEDULED_PAYMENT_SERVICE
        .process_due(process_data, &req)
        .await
}

// 配置路由
pub fn configure_scheduled_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/scheduled-payments")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_scheduled_payments))
            .route("", web::post().to(create_scheduled_payment))
            .route("/process", web::post().to(process_scheduled_payments))
            .route("/{id}", web::put().to(update_scheduled_payment))
            .route("/{id}", web::delete().to(delete_scheduled_payment))
            .route("/{id}/preview", web::get().to(preview_scheduled_payment)),
    );
}
