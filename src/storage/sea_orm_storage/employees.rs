use super::SeaOrmStorage;
use crate::entity::employees::{ActiveModel, Column, Entity as Employees};
use crate::errors::{BizDeskError, Result};
use crate::models::employees::{
    CreateEmployeeRequest, Employee, EmployeeListQuery, EmployeeListResponse, EmployeeStatus,
    UpdateEmployeeRequest,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建员工
    pub async fn create_employee_impl(
        &self,
        business_id: i64,
        req: CreateEmployeeRequest,
    ) -> Result<Employee> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            business_id: Set(business_id),
            user_id: Set(req.user_id),
            name: Set(req.name),
            email: Set(req.email),
            position: Set(req.position),
            payment_model: Set(req.payment_model.to_string()),
            hourly_rate: Set(req.hourly_rate),
            commission_percentage: Set(req.commission_percentage),
            status: Set(EmployeeStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建员工失败: {e}")))?;

        Ok(result.into_employee())
    }

    /// 获取员工
    pub async fn get_employee_impl(&self, business_id: i64, id: i64) -> Result<Option<Employee>> {
        let result = Employees::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_employee()))
    }

    /// 分页列出员工
    pub async fn list_employees_with_pagination_impl(
        &self,
        business_id: i64,
        query: EmployeeListQuery,
    ) -> Result<EmployeeListResponse> {
        let mut select = Employees::find().filter(Column::BusinessId.eq(business_id));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::Position.contains(&escaped)),
            );
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(payment_model) = query.payment_model {
            select = select.filter(Column::PaymentModel.eq(payment_model.to_string()));
        }

        select = select.order_by_asc(Column::Name);

        let (employees, pagination) = self
            .fetch_page(select, query.page, query.size, "员工")
            .await?;

        Ok(EmployeeListResponse {
            items: employees.into_iter().map(|m| m.into_employee()).collect(),
            pagination,
        })
    }

    /// 列出在职员工（工资计算）
    pub async fn list_active_employees_impl(&self, business_id: i64) -> Result<Vec<Employee>> {
        let employees = Employees::find()
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::Status.eq(EmployeeStatus::Active.to_string()))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询员工列表失败: {e}")))?;

        Ok(employees.into_iter().map(|m| m.into_employee()).collect())
    }

    /// 更新员工
    pub async fn update_employee_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>> {
        let Some(existing) = Employees::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询员工失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(position) = update.position {
            model.position = Set(Some(position));
        }
        if let Some(payment_model) = update.payment_model {
            model.payment_model = Set(payment_model.to_string());
        }
        if let Some(rate) = update.hourly_rate {
            model.hourly_rate = Set(rate);
        }
        if let Some(pct) = update.commission_percentage {
            model.commission_percentage = Set(pct);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新员工失败: {e}")))?;

        Ok(Some(updated.into_employee()))
    }

    /// 删除员工
    pub async fn delete_employee_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = Employees::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除员工失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
