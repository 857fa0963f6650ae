//! 餐桌实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dining_tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub name: String,
    pub capacity: i32,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_table(self) -> crate::models::restaurant::DiningTable {
        use crate::models::restaurant::{DiningTable, TableStatus};

        DiningTable {
            id: self.id,
            business_id: self.business_id,
            name: self.name,
            capacity: self.capacity,
            status: self
                .status
                .parse::<TableStatus>()
                .unwrap_or(TableStatus::Available),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
