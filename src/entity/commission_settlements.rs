//! 佣金结算实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "commission_settlements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub employee_id: i64,
    pub period_start: String,
    pub period_end: String,
    pub fee_count: i32,
    pub gross_amount: f64,
    pub expense_reserve: f64,
    pub benefits_reserve: f64,
    pub net_amount: f64,
    pub employee_payment_id: Option<i64>,
    pub created_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_settlement(self) -> crate::models::payroll::CommissionSettlement {
        crate::models::payroll::CommissionSettlement {
            id: self.id,
            business_id: self.business_id,
            employee_id: self.employee_id,
            period_start: super::parse_date(&self.period_start),
            period_end: super::parse_date(&self.period_end),
            fee_count: self.fee_count,
            gross_amount: self.gross_amount,
            expense_reserve: self.expense_reserve,
            benefits_reserve: self.benefits_reserve,
            net_amount: self.net_amount,
            employee_payment_id: self.employee_payment_id,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
