use super::SeaOrmStorage;
use super::users::new_user_model;
use crate::entity::businesses::{ActiveModel, Entity as Businesses};
use crate::errors::{BizDeskError, Result};
use crate::models::{
    businesses::{Business, CreateBusinessRequest, UpdateBusinessRequest},
    users::{CreateUserRequest, User},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 在同一事务中创建商户和所有者
    pub async fn create_business_with_owner_impl(
        &self,
        business: CreateBusinessRequest,
        owner: CreateUserRequest,
    ) -> Result<(Business, User)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let business_model = ActiveModel {
            name: Set(business.name),
            business_type: Set(business.business_type.to_string()),
            currency: Set(business.currency),
            expense_reserve_percentage: Set(0.0),
            benefits_reserve_percentage: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("创建商户失败: {e}")))?;

        let user_model = new_user_model(business_model.id, owner, now)
            .insert(&txn)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建所有者账号失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((business_model.into_business(), user_model.into_user()))
    }

    /// 获取商户
    pub async fn get_business_impl(&self, business_id: i64) -> Result<Option<Business>> {
        let result = Businesses::find_by_id(business_id)
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询商户失败: {e}")))?;

        Ok(result.map(|m| m.into_business()))
    }

    /// 更新商户设置
    pub async fn update_business_impl(
        &self,
        business_id: i64,
        update: UpdateBusinessRequest,
    ) -> Result<Option<Business>> {
        let Some(existing) = Businesses::find_by_id(business_id)
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询商户失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(business_type) = update.business_type {
            model.business_type = Set(business_type.to_string());
        }
        if let Some(currency) = update.currency {
            model.currency = Set(currency);
        }
        if let Some(pct) = update.expense_reserve_percentage {
            model.expense_reserve_percentage = Set(pct);
        }
        if let Some(pct) = update.benefits_reserve_percentage {
            model.benefits_reserve_percentage = Set(pct);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新商户失败: {e}")))?;

        Ok(Some(updated.into_business()))
    }
}
