//! 员工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub payment_model: String,
    pub hourly_rate: f64,
    pub commission_percentage: f64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_employee(self) -> crate::models::employees::Employee {
        use crate::models::employees::{Employee, EmployeeStatus, PaymentModel};

        Employee {
            id: self.id,
            business_id: self.business_id,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            position: self.position,
            payment_model: self
                .payment_model
                .parse::<PaymentModel>()
                .unwrap_or(PaymentModel::Hourly),
            hourly_rate: self.hourly_rate,
            commission_percentage: self.commission_percentage,
            status: self
                .status
                .parse::<EmployeeStatus>()
                .unwrap_or(EmployeeStatus::Active),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
