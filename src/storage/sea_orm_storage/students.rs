use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{BizDeskError, Result};
use crate::models::students::{
    CreateStudentRequest, Student, StudentListQuery, StudentListResponse, StudentStatus,
    UpdateStudentRequest,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set,
};

impl SeaOrmStorage {
    /// 创建学员
    pub async fn create_student_impl(
        &self,
        business_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            business_id: Set(business_id),
            name: Set(req.name),
            email: Set(req.email),
            phone: Set(req.phone),
            guardian_name: Set(req.guardian_name),
            status: Set(StudentStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("创建学员失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 获取学员
    pub async fn get_student_impl(&self, business_id: i64, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学员失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学员
    pub async fn list_students_with_pagination_impl(
        &self,
        business_id: i64,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let mut select = Students::find().filter(Column::BusinessId.eq(business_id));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::Phone.contains(&escaped))
                    .add(Column::GuardianName.contains(&escaped)),
            );
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 按课程筛选：只保留报名了该课程的学员
        if let Some(course_id) = query.course_id {
            select = select.filter(
                Column::Id.in_subquery(
                    Enrollments::find()
                        .select_only()
                        .column(EnrollmentColumn::StudentId)
                        .filter(EnrollmentColumn::BusinessId.eq(business_id))
                        .filter(EnrollmentColumn::CourseId.eq(course_id))
                        .into_query(),
                ),
            );
        }

        select = select.order_by_asc(Column::Name);

        let (students, pagination) = self
            .fetch_page(select, query.page, query.size, "学员")
            .await?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination,
        })
    }

    /// 导出用学员列表
    pub async fn list_students_for_export_impl(
        &self,
        business_id: i64,
        status: Option<StudentStatus>,
        limit: u64,
    ) -> Result<Vec<Student>> {
        let mut select = Students::find().filter(Column::BusinessId.eq(business_id));
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let students = select
            .order_by_asc(Column::Name)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学员列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学员
    pub async fn update_student_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询学员失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(Some(guardian_name));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新学员失败: {e}")))?;

        Ok(Some(updated.into_student()))
    }

    /// 删除学员
    pub async fn delete_student_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = Students::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除学员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
