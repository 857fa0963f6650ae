//! 学费实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub student_id: i64,
    pub course_id: Option<i64>,
    pub scheduled_payment_id: Option<i64>,
    pub settlement_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub due_date: String,
    pub status: String,
    pub paid_at: Option<i64>,
    pub payment_method: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee(self) -> crate::models::fees::StudentFee {
        use crate::models::fees::{FeeStatus, PaymentMethod, StudentFee};

        StudentFee {
            id: self.id,
            business_id: self.business_id,
            student_id: self.student_id,
            course_id: self.course_id,
            scheduled_payment_id: self.scheduled_payment_id,
            settlement_id: self.settlement_id,
            description: self.description,
            amount: self.amount,
            due_date: super::parse_date(&self.due_date),
            status: self
                .status
                .parse::<FeeStatus>()
                .unwrap_or(FeeStatus::Pending),
            paid_at: self.paid_at.map(super::to_datetime),
            payment_method: self
                .payment_method
                .and_then(|m| m.parse::<PaymentMethod>().ok()),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
