use super::SeaOrmStorage;
use super::employee_payments::new_employee_payment_model;
use super::fees::new_fee_model;
use crate::entity::scheduled_payments::{ActiveModel, Column, Entity as ScheduledPayments};
use crate::entity::{format_date, parse_date};
use crate::errors::{BizDeskError, Result};
use crate::models::scheduled_payments::{
    CreateScheduledPaymentRequest, ScheduledPayment, ScheduledPaymentListQuery,
    ScheduledPaymentListResponse, ScheduledPaymentRun, UpdateScheduledPaymentRequest,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建定期付款规则，首次执行日为 start_date
    pub async fn create_scheduled_payment_impl(
        &self,
        business_id: i64,
        req: CreateScheduledPaymentRequest,
    ) -> Result<ScheduledPayment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            business_id: Set(business_id),
            target: Set(req.target.to_string()),
            student_id: Set(req.student_id),
            employee_id: Set(req.employee_id),
            course_id: Set(req.course_id),
            description: Set(req.description),
            amount: Set(req.amount),
            recurrence: Set(req.recurrence.to_string()),
            day_of_month: Set(req.day_of_month.map(|d| d as i32)),
            next_run_date: Set(format_date(req.start_date)),
            end_date: Set(req.end_date.map(format_date)),
            last_run_date: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建定期付款失败: {e}")))?;

        Ok(result.into_scheduled_payment())
    }

    /// 获取定期付款规则
    pub async fn get_scheduled_payment_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<ScheduledPayment>> {
        let result = ScheduledPayments::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询定期付款失败: {e}")))?;

        Ok(result.map(|m| m.into_scheduled_payment()))
    }

    /// 分页列出定期付款规则
    pub async fn list_scheduled_payments_with_pagination_impl(
        &self,
        business_id: i64,
        query: ScheduledPaymentListQuery,
    ) -> Result<ScheduledPaymentListResponse> {
        let mut select = ScheduledPayments::find().filter(Column::BusinessId.eq(business_id));

        if let Some(target) = query.target {
            select = select.filter(Column::Target.eq(target.to_string()));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(employee_id) = query.employee_id {
            select = select.filter(Column::EmployeeId.eq(employee_id));
        }

        select = select
            .order_by_asc(Column::NextRunDate)
            .order_by_asc(Column::Id);

        let (items, pagination) = self
            .fetch_page(select, query.page, query.size, "定期付款")
            .await?;

        Ok(ScheduledPaymentListResponse {
            items: items
                .into_iter()
                .map(|m| m.into_scheduled_payment())
                .collect(),
            pagination,
        })
    }

    /// 列出到期的活跃规则
    pub async fn list_due_scheduled_payments_impl(
        &self,
        business_id: i64,
        as_of: NaiveDate,
    ) -> Result<Vec<ScheduledPayment>> {
        let items = ScheduledPayments::find()
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::NextRunDate.lte(format_date(as_of)))
            .order_by_asc(Column::NextRunDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询到期定期付款失败: {e}")))?;

        Ok(items
            .into_iter()
            .map(|m| m.into_scheduled_payment())
            .collect())
    }

    /// 更新定期付款规则
    pub async fn update_scheduled_payment_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateScheduledPaymentRequest,
    ) -> Result<Option<ScheduledPayment>> {
        let Some(existing) = ScheduledPayments::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询定期付款失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(amount) = update.amount {
            model.amount = Set(amount);
        }
        if let Some(recurrence) = update.recurrence {
            model.recurrence = Set(recurrence.to_string());
        }
        if let Some(day) = update.day_of_month {
            model.day_of_month = Set(Some(day as i32));
        }
        if let Some(next_run_date) = update.next_run_date {
            model.next_run_date = Set(format_date(next_run_date));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(format_date(end_date)));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新定期付款失败: {e}")))?;

        Ok(Some(updated.into_scheduled_payment()))
    }

    /// 删除定期付款规则，已生成的记录保留
    pub async fn delete_scheduled_payment_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = ScheduledPayments::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除定期付款失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 单条规则的一次执行：写入生成的记录并推进规则
    pub async fn apply_scheduled_payment_run_impl(
        &self,
        business_id: i64,
        run: ScheduledPaymentRun,
    ) -> Result<u32> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = ScheduledPayments::find_by_id(run.scheduled_payment_id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询定期付款失败: {e}")))?
            .ok_or_else(|| {
                BizDeskError::not_found(format!(
                    "Scheduled payment {} not found",
                    run.scheduled_payment_id
                ))
            })?;

        // 另一请求已推进过该规则
        if !existing.is_active || parse_date(&existing.next_run_date) != run.expected_next_run_date
        {
            return Err(BizDeskError::conflict(format!(
                "Scheduled payment {} was processed concurrently",
                run.scheduled_payment_id
            )));
        }

        let mut generated = 0u32;
        for fee in run.fees {
            new_fee_model(business_id, fee, now)
                .insert(&txn)
                .await
                .map_err(|e| BizDeskError::database_operation(format!("生成学费失败: {e}")))?;
            generated += 1;
        }
        for payment in run.employee_payments {
            new_employee_payment_model(business_id, payment, now)
                .insert(&txn)
                .await
                .map_err(|e| BizDeskError::database_operation(format!("生成工资失败: {e}")))?;
            generated += 1;
        }

        let mut model: ActiveModel = existing.into();
        model.last_run_date = Set(run.last_run_date.map(format_date));
        model.next_run_date = Set(format_date(run.next_run_date));
        model.is_active = Set(run.is_active);
        model.updated_at = Set(now);
        model
            .update(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("推进定期付款失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(generated)
    }
}
