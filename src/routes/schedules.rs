use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::{ScheduleCheckRequest, ScheduleListQuery, UpdateScheduleRequest};
use crate::models::users::UserRole;
use crate::services::ScheduleService;
use crate::utils::SafeIDI64;

static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleListQuery>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_schedules(query.into_inner(), &req).await
}

pub async fn check_schedules(
    req: HttpRequest,
    check_data: web::Json<ScheduleCheckRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .check_schedules(check_data.into_inner(), &req)
        .await
}

pub async fn update_schedule(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_schedule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(id.0, &req).await
}

// 配置路由
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_schedules))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    // 只检查冲突，不写入
                    .route("/check", web::post().to(check_schedules))
                    .route("/{id}", web::put().to(update_schedule))
                    .route("/{id}", web::delete().to(delete_schedule)),
            ),
    );
}
