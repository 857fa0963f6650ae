//! 定期付款规则实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scheduled_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub target: String,
    pub student_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub course_id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub recurrence: String,
    pub day_of_month: Option<i32>,
    pub next_run_date: String,
    pub end_date: Option<String>,
    pub last_run_date: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_scheduled_payment(self) -> crate::models::scheduled_payments::ScheduledPayment {
        use crate::models::scheduled_payments::{PaymentTarget, Recurrence, ScheduledPayment};

        ScheduledPayment {
            id: self.id,
            business_id: self.business_id,
            target: self
                .target
                .parse::<PaymentTarget>()
                .unwrap_or(PaymentTarget::StudentFee),
            student_id: self.student_id,
            employee_id: self.employee_id,
            course_id: self.course_id,
            description: self.description,
            amount: self.amount,
            recurrence: self
                .recurrence
                .parse::<Recurrence>()
                .unwrap_or(Recurrence::Monthly),
            day_of_month: self.day_of_month.and_then(|d| u32::try_from(d).ok()),
            next_run_date: super::parse_date(&self.next_run_date),
            end_date: self.end_date.as_deref().map(super::parse_date),
            last_run_date: self.last_run_date.as_deref().map(super::parse_date),
            is_active: self.is_active,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
