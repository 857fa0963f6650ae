use super::SeaOrmStorage;
use super::schedules::new_schedule_model;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{BizDeskError, Result};
use crate::models::courses::{
    ClassSchedule, Course, CourseListQuery, CourseListResponse, CourseStatus, CreateCourseRequest,
    UpdateCourseRequest,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 在同一事务中创建课程及其排课
    pub async fn create_course_with_schedules_impl(
        &self,
        business_id: i64,
        req: CreateCourseRequest,
    ) -> Result<(Course, Vec<ClassSchedule>)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let course = ActiveModel {
            business_id: Set(business_id),
            teacher_id: Set(req.teacher_id),
            name: Set(req.name),
            description: Set(req.description),
            monthly_fee: Set(req.monthly_fee),
            capacity: Set(req.capacity),
            status: Set(CourseStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| BizDeskError::database_operation(format!("创建课程失败: {e}")))?;

        let mut schedules = Vec::with_capacity(req.schedules.len());
        for input in req.schedules {
            let schedule = new_schedule_model(business_id, course.id, input, now)
                .insert(&txn)
                .await
                .map_err(|e| BizDeskError::database_operation(format!("创建排课失败: {e}")))?;
            schedules.push(schedule.into_schedule());
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((course.into_course(), schedules))
    }

    /// 获取课程
    pub async fn get_course_impl(&self, business_id: i64, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        business_id: i64,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let mut select = Courses::find().filter(Column::BusinessId.eq(business_id));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        select = select.order_by_asc(Column::Name);

        let (courses, pagination) = self
            .fetch_page(select, query.page, query.size, "课程")
            .await?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination,
        })
    }

    /// 列出商户全部课程
    pub async fn list_all_courses_impl(&self, business_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(Column::BusinessId.eq(business_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        business_id: i64,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(fee) = update.monthly_fee {
            model.monthly_fee = Set(fee);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(Some(capacity));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(updated.into_course()))
    }

    /// 删除课程，排课、报名、考勤、成绩随之级联删除
    pub async fn delete_course_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = Courses::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
