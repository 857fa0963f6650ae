//! 课程与排课

use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_str_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
    pub enum CourseStatus("课程状态") {
        Active => "active",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub business_id: i64,
    /// 授课员工
    pub teacher_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub monthly_fee: f64,
    pub capacity: Option<i32>,
    pub status: CourseStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 每周固定的上课时段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ClassSchedule {
    pub id: i64,
    pub business_id: i64,
    pub course_id: i64,
    /// 0 = 周日 … 6 = 周六
    pub day_of_week: i32,
    /// HH:MM
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ScheduleListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub schedule: ClassSchedule,
    pub course_name: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub schedules: Vec<ClassSchedule>,
    pub enrolled_count: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ScheduleInput {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub teacher_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub monthly_fee: f64,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub schedules: Vec<ScheduleInput>,
    /// 忽略排课冲突强制创建
    #[serde(default)]
    pub force_create: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub teacher_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub monthly_fee: Option<f64>,
    pub capacity: Option<i32>,
    pub status: Option<CourseStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<CourseStatus>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateSchedulesRequest {
    pub schedules: Vec<ScheduleInput>,
    #[serde(default)]
    pub force_create: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateScheduleRequest {
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
    #[serde(default)]
    pub force_create: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ScheduleListQuery {
    pub day_of_week: Option<i32>,
    pub room: Option<String>,
    pub course_id: Option<i64>,
    /// 只返回进行中课程的排课，归档课程不再占用教室
    #[serde(default)]
    pub active_only: bool,
}

impl ScheduleListQuery {
    /// 进行中课程的全部排课
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Default::default()
        }
    }
}

/// 冲突检查（不写入）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ScheduleCheckRequest {
    /// 新建课程时为空
    pub course_id: Option<i64>,
    /// 修改已有排课时排除自身
    pub exclude_schedule_id: Option<i64>,
    pub schedules: Vec<ScheduleInput>,
}

/// 与提议排课冲突的已有排课
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ScheduleConflict {
    pub course_id: i64,
    pub course_name: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ScheduleCheckResponse {
    pub has_conflicts: bool,
    pub duplicates: Vec<ScheduleConflict>,
    pub room_conflicts: Vec<ScheduleConflict>,
}
