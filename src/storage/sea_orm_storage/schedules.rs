use super::SeaOrmStorage;
use crate::entity::class_schedules::{ActiveModel, Column, Entity as ClassSchedules};
use crate::entity::courses::Entity as Courses;
use crate::errors::{BizDeskError, Result};
use crate::models::courses::{
    ClassSchedule, CourseStatus, ScheduleInput, ScheduleListItem, ScheduleListQuery,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

pub(super) fn new_schedule_model(
    business_id: i64,
    course_id: i64,
    input: ScheduleInput,
    now: i64,
) -> ActiveModel {
    ActiveModel {
        business_id: Set(business_id),
        course_id: Set(course_id),
        day_of_week: Set(input.day_of_week),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        room: Set(input.room),
        created_at: Set(now),
        ..Default::default()
    }
}

impl SeaOrmStorage {
    /// 列出排课（附课程名）
    pub async fn list_schedules_impl(
        &self,
        business_id: i64,
        query: ScheduleListQuery,
    ) -> Result<Vec<ScheduleListItem>> {
        let mut select = ClassSchedules::find().filter(Column::BusinessId.eq(business_id));

        if let Some(day) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let rows = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .find_also_related(Courses)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询排课列表失败: {e}")))?;

        // 教室按去空白、忽略大小写匹配
        let room = query
            .room
            .as_deref()
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty());

        let active = CourseStatus::Active.to_string();

        Ok(rows
            .into_iter()
            .filter(|(_, course)| {
                !query.active_only || course.as_ref().is_some_and(|c| c.status == active)
            })
            .filter(|(schedule, _)| match &room {
                Some(room) => schedule
                    .room
                    .as_deref()
                    .is_some_and(|r| r.trim().to_lowercase() == *room),
                None => true,
            })
            .map(|(schedule, course)| ScheduleListItem {
                course_name: course.map(|c| c.name).unwrap_or_default(),
                schedule: schedule.into_schedule(),
            })
            .collect())
    }

    /// 列出课程的排课
    pub async fn list_course_schedules_impl(
        &self,
        business_id: i64,
        course_id: i64,
    ) -> Result<Vec<ClassSchedule>> {
        let schedules = ClassSchedules::find()
            .filter(Column::BusinessId.eq(business_id))
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询排课失败: {e}")))?;

        Ok(schedules.into_iter().map(|m| m.into_schedule()).collect())
    }

    /// 批量添加排课
    pub async fn create_schedules_impl(
        &self,
        business_id: i64,
        course_id: i64,
        inputs: Vec<ScheduleInput>,
    ) -> Result<Vec<ClassSchedule>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let schedule = new_schedule_model(business_id, course_id, input, now)
                .insert(&txn)
                .await
                .map_err(|e| BizDeskError::database_operation(format!("创建排课失败: {e}")))?;
            created.push(schedule.into_schedule());
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    /// 获取排课
    pub async fn get_schedule_impl(
        &self,
        business_id: i64,
        id: i64,
    ) -> Result<Option<ClassSchedule>> {
        let result = ClassSchedules::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询排课失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 覆盖排课的时间与教室
    pub async fn update_schedule_impl(
        &self,
        business_id: i64,
        id: i64,
        input: ScheduleInput,
    ) -> Result<Option<ClassSchedule>> {
        let Some(existing) = ClassSchedules::find_by_id(id)
            .filter(Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询排课失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.day_of_week = Set(input.day_of_week);
        model.start_time = Set(input.start_time);
        model.end_time = Set(input.end_time);
        model.room = Set(input.room);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("更新排课失败: {e}")))?;

        Ok(Some(updated.into_schedule()))
    }

    /// 删除排课
    pub async fn delete_schedule_impl(&self, business_id: i64, id: i64) -> Result<bool> {
        let result = ClassSchedules::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("删除排课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
