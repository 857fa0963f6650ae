//! 餐饮：餐桌、订单与预订

pub mod orders;
pub mod reservations;
pub mod tables;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::restaurant::{
    CreateOrderRequest, CreateReservationRequest, CreateTableRequest, OrderItemInput,
    OrderListQuery, PayOrderRequest, ReservationListQuery, UpdateReservationRequest,
    UpdateTableRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct RestaurantService {
    storage: Option<Arc<dyn Storage>>,
}

impl_storage_service!(RestaurantService);

impl RestaurantService {
    // 餐桌
    pub async fn list_tables(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        tables::list_tables(self, request).await
    }

    pub async fn create_table(
        &self,
        req: CreateTableRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        tables::create_table(self, req, request).await
    }

    pub async fn update_table(
        &self,
        id: i64,
        req: UpdateTableRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        tables::update_table(self, id, req, request).await
    }

    pub async fn delete_table(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        tables::delete_table(self, id, request).await
    }

    // 订单
    pub async fn create_order(
        &self,
        req: CreateOrderRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        orders::create_order(self, req, request).await
    }

    pub async fn get_order(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        orders::get_order(self, id, request).await
    }

    pub async fn list_orders(
        &self,
        query: OrderListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        orders::list_orders(self, query, request).await
    }

    pub async fn add_items(
        &self,
        order_id: i64,
        items: Vec<OrderItemInput>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        orders::add_items(self, order_id, items, request).await
    }

    pub async fn remove_item(
        &self,
        order_id: i64,
        item_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        orders::remove_item(self, order_id, item_id, request).await
    }

    pub async fn pay_order(
        &self,
        order_id: i64,
        req: PayOrderRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        orders::pay_order(self, order_id, req, request).await
    }

    pub async fn cancel_order(
        &self,
        order_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        orders::cancel_order(self, order_id, request).await
    }

    // 预订
    pub async fn create_reservation(
        &self,
        req: CreateReservationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reservations::create_reservation(self, req, request).await
    }

    pub async fn list_reservations(
        &self,
        query: ReservationListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reservations::list_reservations(self, query, request).await
    }

    pub async fn update_reservation(
        &self,
        id: i64,
        req: UpdateReservationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reservations::update_reservation(self, id, req, request).await
    }
}

pub(crate) fn table_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::TableNotFound,
        "Table not found",
    ))
}

pub(crate) fn order_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::OrderNotFound,
        "Order not found",
    ))
}

pub(crate) fn bad_request(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))
}
