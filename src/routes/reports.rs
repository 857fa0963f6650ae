use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::SummaryQuery;
use crate::services::ReportService;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn get_summary(
    req: HttpRequest,
    query: web::Query<SummaryQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_summary(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .route("/summary", web::get().to(get_summary)),
    );
}
