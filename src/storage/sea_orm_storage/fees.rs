use super::SeaOrmStorage;
use crate::entity::format_date;
use crate::entity::student_fees::{ActiveModel, Column, Entity as StudentFees};
use crate::errors::{BizDeskError, Result};
use crate::models::fees::{
    FeeExportQuery, FeeListQuery, FeeListResponse, FeeStatus, NewStudentFee, PaymentMethod,
    StudentFee, UpdateFeeRequest,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

/// 构建待插入的待缴学费行
pub(super) fn new_fee_model(business_id: i64, fee: NewStudentFee, now: i64) -> ActiveModel {
    ActiveModel {
        business_id: Set(business_id),
        student_id: Set(fee.student_id),
        course_id: Set(fee.course_id),
        scheduled_payment_id: Set(fee.scheduled_payment_id),
        settlement_id: Set(None),
        description: Set(fee.description),
        amount: Set(fee.amount),
        due_date: Set(format_date(fee.due_date)),
        status: Set(FeeStatus::Pending.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn filter_due(
    mut select: Select<StudentFees>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Select<StudentFees> {
    if let Some(from) = from {
        select = select.filter(Column::DueDate.gte(format_date(from)));
    }
    if let Some(to) = to {
        select = select.filter(Column::DueDate.lte(format_date(to)));
    }
    select
}

impl SeaOrmStorage {
    /// 创建学费
    pub async fn create_fee_impl(&self, business_id: i64, fee: NewStudentFee) -> Result<StudentFee> {
        let now = chrono::Utc::now().timestamp();

        let result = new_fee_model(business_id, fee, now)
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建学费失败: {e}")))?;

        Ok(result.into_fee())
    }

    /// 获取学费
    pub async fn get_fee_impl(&self, business_id: i64, id: i64) -> Result<Option<StudentFee>> {
        let result = StudentFees::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学费失败: {e}")))?;

        Ok(result.map(|m| m.into_fee()))
    }

    /// 分页列出学费
    pub async fn list_fees_with_pagination_impl(
        &self,
        business_id: i64,
        query: FeeListQuery,
    ) -> Result<FeeListResponse> {
        let mut select = StudentFees::find().filter(Column::BusinessId.eq(business_id));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select = filter_due(select, query.due_from, query.due_to)
            .order_by_desc(Column::DueDate)
            .order_by_desc(Column::Id);

        let (fees, pagination) = self
            .fetch_page(select, query.page, query.size, "学费")
            .await?;

        Ok(FeeListResponse {
            items: fees.into_iter().map(|m| m.into_fee()).collect(),
            pagination,
        })
    }

    /// 导出用学费列表
    pub async fn list_fees_for_export_impl(
        &self,
        business_id: i64,
        query: FeeExportQuery,
        limit: u64,
    ) -> Result<Vec<StudentFee>> {
        let mut select = StudentFees::find().filter(Column::BusinessId.eq(business_id));
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let fees = filter_due(select, query.due_from, query.due_to)
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学费列表失败: {e}")))?;

        Ok(fees.into_iter().map(|m| m.into_fee()).collect())
    }

    /// 已付学费，按 paid_at 落在 [from_ts, to_ts) 内筛选
    pub async fn list_paid_fees_impl(
        &self,
        business_id: i64,
        from_ts: i64,
        to_ts: i64,
        unsettled_only: bool,
    ) -> Result<Vec<StudentFee>> {
        let mut select = StudentFees::find()
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::Status.eq(FeeStatus::Paid.to_string()))
            .filter(Column::PaidAt.gte(from_ts))
            .filter(Column::PaidAt.lt(to_ts));
        if unsettled_only {
            select = select.filter(Column::SettlementId.is_null());
        }

        let fees = select
            .order_by_asc(Column::PaidAt)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询已付学费失败: {e}")))?;

        Ok(fees.into_iter().map(|m| m.into_fee()).collect())
    }

    /// 更新学费
    pub async fn update_fee_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateFeeRequest,
    ) -> Result<Option<StudentFee>> {
        let Some(existing) = StudentFees::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学费失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(course_id) = update.course_id {
            model.course_id = Set(Some(course_id));
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(amount) = update.amount {
            model.amount = Set(amount);
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(format_date(due_date));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新学费失败: {e}")))?;

        Ok(Some(updated.into_fee()))
    }

    /// 登记缴费
    pub async fn pay_fee_impl(
        &self,
        business_id: i64,
        id: i64,
        method: PaymentMethod,
        paid_at: i64,
    ) -> Result<Option<StudentFee>> {
        let Some(existing) = StudentFees::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学费失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(FeeStatus::Paid.to_string());
        model.paid_at = Set(Some(paid_at));
        model.payment_method = Set(Some(method.to_string()));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("登记缴费失败: {e}")))?;

        Ok(Some(updated.into_fee()))
    }

    /// 删除学费
    pub async fn delete_fee_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = StudentFees::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除学费失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 将到期未付的学费标记为逾期
    pub async fn mark_overdue_fees_impl(&self, business_id: i64, today: NaiveDate) -> Result<u64> {
        let result = StudentFees::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(FeeStatus::Overdue.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::Status.eq(FeeStatus::Pending.to_string()))
            .filter(Column::DueDate.lt(format_date(today)))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("标记逾期学费失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
