//! 员工付款实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub employee_id: i64,
    pub scheduled_payment_id: Option<i64>,
    pub settlement_id: Option<i64>,
    pub kind: String,
    pub description: String,
    pub amount: f64,
    pub payment_date: String,
    pub status: String,
    pub paid_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_employee_payment(self) -> crate::models::employee_payments::EmployeePayment {
        use crate::models::employee_payments::{
            EmployeePayment, EmployeePaymentKind, EmployeePaymentStatus,
        };

        EmployeePayment {
            id: self.id,
            business_id: self.business_id,
            employee_id: self.employee_id,
            scheduled_payment_id: self.scheduled_payment_id,
            settlement_id: self.settlement_id,
            kind: self
                .kind
                .parse::<EmployeePaymentKind>()
                .unwrap_or(EmployeePaymentKind::Salary),
            description: self.description,
            amount: self.amount,
            payment_date: super::parse_date(&self.payment_date),
            status: self
                .status
                .parse::<EmployeePaymentStatus>()
                .unwrap_or(EmployeePaymentStatus::Pending),
            paid_at: self.paid_at.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
