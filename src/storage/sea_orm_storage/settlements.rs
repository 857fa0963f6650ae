use super::SeaOrmStorage;
use crate::entity::commission_settlements::{ActiveModel, Column, Entity as Settlements};
use crate::entity::employee_payments::{
    ActiveModel as PaymentActiveModel, Entity as EmployeePayments,
};
use crate::entity::format_date;
use crate::entity::student_fees::{Column as FeeColumn, Entity as StudentFees};
use crate::errors::{BizDeskError, Result};
use crate::models::employee_payments::{EmployeePaymentKind, EmployeePaymentStatus};
use crate::models::payroll::{
    CommissionSettlement, NewSettlement, SettlementListQuery, SettlementListResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建佣金结算：已发放的佣金付款、结算记录、学费打标在同一事务中完成
    pub async fn create_settlement_impl(
        &self,
        business_id: i64,
        settlement: NewSettlement,
    ) -> Result<CommissionSettlement> {
        let now = chrono::Utc::now().timestamp();
        let fee_count = settlement.fee_ids.len();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let payment = PaymentActiveModel {
            business_id: Set(business_id),
            employee_id: Set(settlement.employee_id),
            scheduled_payment_id: Set(None),
            settlement_id: Set(None),
            kind: Set(EmployeePaymentKind::Commission.to_string()),
            description: Set(format!(
                "Commission {} - {}",
                format_date(settlement.period_start),
                format_date(settlement.period_end)
            )),
            amount: Set(settlement.net_amount),
            payment_date: Set(format_date(settlement.period_end)),
            status: Set(EmployeePaymentStatus::Paid.to_string()),
            paid_at: Set(Some(now)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("创建佣金付款失败: {e}")))?;

        let record = ActiveModel {
            business_id: Set(business_id),
            employee_id: Set(settlement.employee_id),
            period_start: Set(format_date(settlement.period_start)),
            period_end: Set(format_date(settlement.period_end)),
            fee_count: Set(fee_count as i32),
            gross_amount: Set(settlement.gross_amount),
            expense_reserve: Set(settlement.expense_reserve),
            benefits_reserve: Set(settlement.benefits_reserve),
            net_amount: Set(settlement.net_amount),
            employee_payment_id: Set(Some(payment.id)),
            created_by: Set(settlement.created_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("创建佣金结算失败: {e}")))?;

        EmployeePayments::update_many()
            .col_expr(
                crate::entity::employee_payments::Column::SettlementId,
                sea_orm::sea_query::Expr::value(record.id),
            )
            .filter(crate::entity::employee_payments::Column::Id.eq(payment.id))
            .exec(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("关联佣金付款失败: {e}")))?;

        // 只打标仍未结算的学费，数量不符说明有并发结算
        let stamped = StudentFees::update_many()
            .col_expr(
                FeeColumn::SettlementId,
                sea_orm::sea_query::Expr::value(record.id),
            )
            .filter(FeeColumn::BusinessId.eq(business_id))
            .filter(FeeColumn::Id.is_in(settlement.fee_ids))
            .filter(FeeColumn::SettlementId.is_null())
            .exec(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("标记已结算学费失败: {e}")))?;

        if stamped.rows_affected != fee_count as u64 {
            return Err(BizDeskError::conflict(
                "Some fees were settled by another request",
            ));
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(record.into_settlement())
    }

    /// 分页列出佣金结算
    pub async fn list_settlements_with_pagination_impl(
        &self,
        business_id: i64,
        query: SettlementListQuery,
    ) -> Result<SettlementListResponse> {
        let mut select = Settlements::find().filter(Column::BusinessId.eq(business_id));

        if let Some(employee_id) = query.employee_id {
            select = select.filter(Column::EmployeeId.eq(employee_id));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let (items, pagination) = self
            .fetch_page(select, query.page, query.size, "佣金结算")
            .await?;

        Ok(SettlementListResponse {
            items: items.into_iter().map(|m| m.into_settlement()).collect(),
            pagination,
        })
    }
}
