use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{BizDeskError, Result};
use crate::models::grades::{
    CreateGradeRequest, Grade, GradeListQuery, GradeListResponse, UpdateGradeRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_grade_impl(
        &self,
        business_id: i64,
        graded_by: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade> {
        let model = ActiveModel {
            business_id: Set(business_id),
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            title: Set(req.title),
            score: Set(req.score),
            max_score: Set(req.max_score),
            comment: Set(req.comment),
            graded_by: Set(graded_by),
            graded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_grade())
    }

    /// 获取成绩
    pub async fn get_grade_impl(&self, business_id: i64, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩
    pub async fn list_grades_with_pagination_impl(
        &self,
        business_id: i64,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let mut select = Grades::find().filter(Column::BusinessId.eq(business_id));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select.order_by_desc(Column::GradedAt);

        let (grades, pagination) = self
            .fetch_page(select, query.page, query.size, "成绩")
            .await?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination,
        })
    }

    /// 更新成绩
    pub async fn update_grade_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let Some(existing) = Grades::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询成绩失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.graded_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(score) = update.score {
            model.score = Set(score);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(comment) = update.comment {
            model.comment = Set(Some(comment));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(Some(updated.into_grade()))
    }

    /// 删除成绩
    pub async fn delete_grade_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = Grades::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
