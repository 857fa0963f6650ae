//! 餐桌、订单与预订

use crate::models::common::PaginationInfo;
use crate::models::fees::PaymentMethod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
    pub enum TableStatus("餐桌状态") {
        Available => "available",
        Occupied => "occupied",
        Reserved => "reserved",
    }
}

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
    pub enum OrderStatus("订单状态") {
        Open => "open",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
    pub enum ReservationStatus("预订状态") {
        Booked => "booked",
        Seated => "seated",
        Cancelled => "cancelled",
        NoShow => "no_show",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct DiningTable {
    pub id: i64,
    pub business_id: i64,
    pub name: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct CreateTableRequest {
    pub name: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct Order {
    pub id: i64,
    pub business_id: i64,
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub total: f64,
    pub payment_method: Option<PaymentMethod>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct OrderDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct OrderItemInput {
    pub name: String,
    pub unit_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub note: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct CreateOrderRequest {
    pub table_id: Option<i64>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct PayOrderRequest {
    pub payment_method: PaymentMethod,
    /// 小费，计入总额
    pub tip: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<OrderStatus>,
    pub table_id: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct OrderListResponse {
    pub items: Vec<Order>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct Reservation {
    pub id: i64,
    pub business_id: i64,
    pub table_id: Option<i64>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub party_size: i32,
    pub reserved_for: chrono::DateTime<chrono::Utc>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct CreateReservationRequest {
    pub table_id: Option<i64>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub party_size: i32,
    pub reserved_for: chrono::DateTime<chrono::Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct UpdateReservationRequest {
    pub table_id: Option<i64>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub party_size: Option<i32>,
    pub reserved_for: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<ReservationStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct ReservationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<ReservationStatus>,
    /// 按预订日期（UTC）筛选
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/restaurant.ts")]
pub struct ReservationListResponse {
    pub items: Vec<Reservation>,
    pub pagination: PaginationInfo,
}
