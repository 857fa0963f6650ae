use super::SeaOrmStorage;
use crate::entity::employee_payments::{ActiveModel, Column, Entity as EmployeePayments};
use crate::entity::format_date;
use crate::errors::{BizDeskError, Result};
use crate::models::employee_payments::{
    EmployeePayment, EmployeePaymentListQuery, EmployeePaymentListResponse, EmployeePaymentStatus,
    NewEmployeePayment,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// 构建待插入的待发员工付款行
pub(super) fn new_employee_payment_model(
    business_id: i64,
    payment: NewEmployeePayment,
    now: i64,
) -> ActiveModel {
    ActiveModel {
        business_id: Set(business_id),
        employee_id: Set(payment.employee_id),
        scheduled_payment_id: Set(payment.scheduled_payment_id),
        settlement_id: Set(None),
        kind: Set(payment.kind.to_string()),
        description: Set(payment.description),
        amount: Set(payment.amount),
        payment_date: Set(format_date(payment.payment_date)),
        status: Set(EmployeePaymentStatus::Pending.to_string()),
        paid_at: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
}

impl SeaOrmStorage {
    /// 获取员工付款
    pub async fn get_employee_payment_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<EmployeePayment>> {
        let result = EmployeePayments::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询员工付款失败: {e}")))?;

        Ok(result.map(|m| m.into_employee_payment()))
    }

    /// 分页列出员工付款
    pub async fn list_employee_payments_with_pagination_impl(
        &self,
        business_id: i64,
        query: EmployeePaymentListQuery,
    ) -> Result<EmployeePaymentListResponse> {
        let mut select = EmployeePayments::find().filter(Column::BusinessId.eq(business_id));

        if let Some(employee_id) = query.employee_id {
            select = select.filter(Column::EmployeeId.eq(employee_id));
        }
        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::PaymentDate)
            .order_by_desc(Column::Id);

        let (items, pagination) = self
            .fetch_page(select, query.page, query.size, "员工付款")
            .await?;

        Ok(EmployeePaymentListResponse {
            items: items
                .into_iter()
                .map(|m| m.into_employee_payment())
                .collect(),
            pagination,
        })
    }

    /// 标记员工付款为已发放
    pub async fn pay_employee_payment_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<EmployeePayment>> {
        let Some(existing) = EmployeePayments::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询员工付款失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(EmployeePaymentStatus::Paid.to_string());
        model.paid_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新员工付款失败: {e}")))?;

        Ok(Some(updated.into_employee_payment()))
    }
}
