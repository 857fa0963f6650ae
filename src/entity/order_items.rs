//! 订单明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub note: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_order_item(self) -> crate::models::restaurant::OrderItem {
        crate::models::restaurant::OrderItem {
            id: self.id,
            order_id: self.order_id,
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            note: self.note,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
