use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::businesses::UpdateBusinessRequest;
use crate::models::users::UserRole;
use crate::services::BusinessService;

static BUSINESS_SERVICE: Lazy<BusinessService> = Lazy::new(BusinessService::new_lazy);

pub async fn get_business(req: HttpRequest) -> ActixResult<HttpResponse> {
    BUSINESS_SERVICE.get_business(&req).await
}

pub async fn update_business(
    req: HttpRequest,
    update_data: web::Json<UpdateBusinessRequest>,
) -> ActixResult<HttpResponse> {
    BUSINESS_SERVICE
        .update_business(update_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_business_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/business")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(get_business))
                    .route(
                        web::put()
                            .to(update_business)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
