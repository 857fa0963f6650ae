//! 商户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub business_type: String,
    pub currency: String,
    pub expense_reserve_percentage: f64,
    pub benefits_reserve_percentage: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_business(self) -> crate::models::businesses::Business {
        use crate::models::businesses::{Business, BusinessType};

        Business {
            id: self.id,
            name: self.name,
            business_type: self
                .business_type
                .parse::<BusinessType>()
                .unwrap_or(BusinessType::Services),
            currency: self.currency,
            expense_reserve_percentage: self.expense_reserve_percentage,
            benefits_reserve_percentage: self.benefits_reserve_percentage,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
