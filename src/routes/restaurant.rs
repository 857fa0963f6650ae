use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::restaurant::{
    CreateOrderRequest, CreateReservationRequest, CreateTableRequest, OrderItemInput,
    OrderListQuery, PayOrderRequest, ReservationListQuery, UpdateReservationRequest,
    UpdateTableRequest,
};
use crate::models::users::UserRole;
use crate::services::RestaurantService;
use crate::utils::{SafeIDI64, SafeItemIdI64};

static RESTAURANT_SERVICE: Lazy<RestaurantService> = Lazy::new(RestaurantService::new_lazy);

// 餐桌
pub async fn list_tables(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE.list_tables(&req).await
}

pub async fn create_table(
    req: HttpRequest,
    table_data: web::Json<CreateTableRequest>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .create_table(table_data.into_inner(), &req)
        .await
}

pub async fn update_table(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateTableRequest>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .update_table(id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_table(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE.delete_table(id.0, &req).await
}

// 订单
pub async fn list_orders(
    req: HttpRequest,
    query: web::Query<OrderListQuery>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE.list_orders(query.into_inner(), &req).await
}

pub async fn create_order(
    req: HttpRequest,
    order_data: web::Json<CreateOrderRequest>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .create_order(order_data.into_inner(), &req)
        .await
}

pub async fn get_order(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE.get_order(id.0, &req).await
}

pub async fn add_items(
    req: HttpRequest,
    id: SafeIDI64,
    items: web::Json<Vec<OrderItemInput>>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .add_items(id.0, items.into_inner(), &req)
        .await
}

pub async fn remove_item(
    req: HttpRequest,
    id: SafeIDI64,
    item_id: SafeItemIdI64,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE.remove_item(id.0, item_id.0, &req).await
}

pub async fn pay_order(
    req: HttpRequest,
    id: SafeIDI64,
    pay_data: web::Json<PayOrderRequest>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .pay_order(id.0, pay_data.into_inner(), &req)
        .await
}

pub async fn cancel_order(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE.cancel_order(id.0, &req).await
}

// 预订
pub async fn list_reservations(
    req: HttpRequest,
    query: web::Query<ReservationListQuery>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .list_reservations(query.into_inner(), &req)
        .await
}

pub async fn create_reservation(
    req: HttpRequest,
    reservation_data: web::Json<CreateReservationRequest>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .create_reservation(reservation_data.into_inner(), &req)
        .await
}

pub async fn update_reservation(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateReservationRequest>,
) -> ActixResult<HttpResponse> {
    RESTAURANT_SERVICE
        .update_reservation(id.0, update_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_restaurant_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tables")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_tables))
            .service(
                web::scope("")
                    // 餐桌维护仅限管理员
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_table))
                    .route("/{id}", web::put().to(update_table))
                    .route("/{id}", web::delete().to(delete_table)),
            ),
    )
    .service(
        web::scope("/api/v1/orders")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_orders))
            .route("", web::post().to(create_order))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}/items", web::post().to(add_items))
            .route("/{id}/items/{item_id}", web::delete().to(remove_item))
            .route("/{id}/pay", web::post().to(pay_order))
            .route("/{id}/cancel", web::post().to(cancel_order)),
    )
    .service(
        web::scope("/api/v1/reservations")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_reservations))
            .route("", web::post().to(create_reservation))
            .route("/{id}", web::put().to(update_reservation)),
    );
}
