use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::{
    AttendanceExportQuery, AttendanceListQuery, RecordAttendanceRequest,
};
use crate::models::users::UserRole;
use crate::services::AttendanceService;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    attendance_data: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(attendance_data.into_inner(), &req)
        .await
}

pub async fn export_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceExportQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .export_attendance(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    // 按课程和日期批量记录
                    .route(
                        web::post()
                            .to(record_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    ),
            )
            .service(
                web::resource("/export").route(
                    web::get()
                        .to(export_attendance)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                ),
            ),
    );
}
