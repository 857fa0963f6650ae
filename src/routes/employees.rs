use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::employees::{CreateEmployeeRequest, EmployeeListQuery, UpdateEmployeeRequest};
use crate::models::users::UserRole;
use crate::services::EmployeeService;
use crate::utils::SafeIDI64;

static EMPLOYEE_SERVICE: Lazy<EmployeeService> = Lazy::new(EmployeeService::new_lazy);

pub async fn list_employees(
    req: HttpRequest,
    query: web::Query<EmployeeListQuery>,
) -> ActixResult<HttpResponse> {
    EMPLOYEE_SERVICE.list_employees(query.into_inner(), &req).await
}

pub async fn create_employee(
    req: HttpRequest,
    employee_data: web::Json<CreateEmployeeRequest>,
) -> ActixResult<HttpResponse> {
    EMPLOYEE_SERVICE
        .create_employee(employee_data.into_inner(), &req)
        .await
}

pub async fn get_employee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EMPLOYEE_SERVICE.get_employee(id.0, &req).await
}

pub async fn update_employee(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateEmployeeRequest>,
) -> ActixResult<HttpResponse> {
    EMPLOYEE_SERVICE
        .update_employee(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_employee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EMPLOYEE_SERVICE.delete_employee(id.0, &req).await
}

// 配置路由
pub fn configure_employee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/employees")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 员工也可以查看人员列表
                    .route(
                        web::get()
                            .to(list_employees)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_employee)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_employee)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_employee)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_employee)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
