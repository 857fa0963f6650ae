//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub business_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub title: String,
    pub score: f64,
    pub max_score: f64,
    pub comment: Option<String>,
    pub graded_by: i64,
    pub graded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::Grade {
        crate::models::grades::Grade {
            id: self.id,
            business_id: self.business_id,
            student_id: self.student_id,
            course_id: self.course_id,
            title: self.title,
            score: self.score,
            max_score: self.max_score,
            comment: self.comment,
            graded_by: self.graded_by,
            graded_at: super::to_datetime(self.graded_at),
        }
    }
}
