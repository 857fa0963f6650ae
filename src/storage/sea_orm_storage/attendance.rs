use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::entity::format_date;
use crate::errors::{BizDeskError, Result};
use crate::models::attendance::{
    Attendance, AttendanceExportQuery, AttendanceListQuery, AttendanceListResponse,
    RecordAttendanceRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};

fn filter_dates(
    mut select: Select<AttendanceRecords>,
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
) -> Select<AttendanceRecords> {
    // ISO 日期字符串可直接按字典序比较
    if let Some(from) = from {
        select = select.filter(Column::Date.gte(format_date(from)));
    }
    if let Some(to) = to {
        select = select.filter(Column::Date.lte(format_date(to)));
    }
    select
}

impl SeaOrmStorage {
    /// 按 (学员, 课程, 日期) 写入考勤，已有记录则覆盖
    pub async fn upsert_attendance_impl(
        &self,
        business_id: i64,
        recorded_by: i64,
        req: RecordAttendanceRequest,
    ) -> Result<Vec<Attendance>> {
        let now = chrono::Utc::now().timestamp();
        let date = format_date(req.date);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(req.records.len());
        for entry in req.records {
            let existing = AttendanceRecords::find()
                .filter(Column::BusinessId.eq(business_id))
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::CourseId.eq(req.course_id))
                .filter(Column::Date.eq(date.clone()))
                .one(&txn)
                .await
                .map_err(|e| BizDeskError::database_operation(format!("查询考勤失败: {e}")))?;

            let model = match existing {
                Some(existing) => {
                    let mut model: ActiveModel = existing.into();
                    model.status = Set(entry.status.to_string());
                    model.notes = Set(entry.notes);
                    model.recorded_by = Set(recorded_by);
                    model.updated_at = Set(now);
                    model.update(&txn).await
                }
                None => {
                    ActiveModel {
                        business_id: Set(business_id),
                        student_id: Set(entry.student_id),
                        course_id: Set(req.course_id),
                        date: Set(date.clone()),
                        status: Set(entry.status.to_string()),
                        notes: Set(entry.notes),
                        recorded_by: Set(recorded_by),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                }
            }
            .map_err(|e| BizDeskError::database_operation(format!("保存考勤失败: {e}")))?;

            saved.push(model.into_attendance());
        }

        txn.commit()
            .await
            .map_err(|e| BizDeskError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    /// 分页列出考勤
    pub async fn list_attendance_with_pagination_impl(
        &self,
        business_id: i64,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let mut select = AttendanceRecords::find().filter(Column::BusinessId.eq(business_id));

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select = filter_dates(select, query.date_from, query.date_to)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId);

        let (records, pagination) = self
            .fetch_page(select, query.page, query.size, "考勤")
            .await?;

        Ok(AttendanceListResponse {
            items: records.into_iter().map(|m| m.into_attendance()).collect(),
            pagination,
        })
    }

    /// 导出用考勤列表
    pub async fn list_attendance_for_export_impl(
        &self,
        business_id: i64,
        query: AttendanceExportQuery,
        limit: u64,
    ) -> Result<Vec<Attendance>> {
        let mut select = AttendanceRecords::find().filter(Column::BusinessId.eq(business_id));
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let records = filter_dates(select, query.date_from, query.date_to)
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StudentId)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| BizDeskError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }
}
