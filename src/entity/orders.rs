//! 订单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub table_id: Option<i64>,
    pub status: String,
    pub subtotal: f64,
    pub total: f64,
    pub payment_method: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub closed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_order(self) -> crate::models::restaurant::Order {
        use crate::models::fees::PaymentMethod;
        use crate::models::restaurant::{Order, OrderStatus};

        Order {
            id: self.id,
            business_id: self.business_id,
            table_id: self.table_id,
            status: self
                .status
                .parse::<OrderStatus>()
                .unwrap_or(OrderStatus::Open),
            subtotal: self.subtotal,
            total: self.total,
            payment_method: self
                .payment_method
                .and_then(|m| m.parse::<PaymentMethod>().ok()),
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
            closed_at: self.closed_at.map(super::to_datetime),
        }
    }
}
