use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{BizDeskError, Result};
use crate::models::enrollments::{
    CreateEnrollmentRequest, Enrollment, EnrollmentListQuery, EnrollmentListResponse,
    EnrollmentStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建报名
    pub async fn create_enrollment_impl(
        &self,
        business_id: i64,
        req: CreateEnrollmentRequest,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            business_id: Set(business_id),
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            status: Set(EnrollmentStatus::Active.to_string()),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建报名失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 获取报名
    pub async fn get_enrollment_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 按学员与课程查找报名
    pub async fn find_enrollment_impl(
        &self,
        business_id: i64,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 统计课程的在读人数
    pub async fn count_active_enrollments_impl(
        &self,
        business_id: i64,
        course_id: i64,
    ) -> Result<u64> {
        Enrollments::find()
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("统计报名人数失败: {e}")))
    }

    /// 分页列出报名
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        business_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let mut select = Enrollments::find().filter(Column::BusinessId.eq(business_id));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::EnrolledAt);

        let (enrollments, pagination) = self
            .fetch_page(select, query.page, query.size, "报名")
            .await?;

        Ok(EnrollmentListResponse {
            items: enrollments
                .into_iter()
                .map(|m| m.into_enrollment())
                .collect(),
            pagination,
        })
    }

    /// 更新报名状态
    pub async fn update_enrollment_status_impl(
        &self,
        business_id: i64,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        let Some(existing) = Enrollments::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询报名失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新报名失败: {e}")))?;

        Ok(Some(updated.into_enrollment()))
    }

    /// 删除报名
    pub async fn delete_enrollment_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除报名失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
