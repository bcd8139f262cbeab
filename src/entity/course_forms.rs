//! 评价表单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_forms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub state: String,
    pub due_at: Option<i64>,
    pub allow_late: bool,
    pub self_evaluate: bool,
    pub color_1: String,
    pub color_2: String,
    pub color_3: String,
    pub color_4: String,
    pub color_5: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::likert_questions::Entity")]
    LikertQuestions,
    #[sea_orm(has_many = "super::open_ended_questions::Entity")]
    OpenEndedQuestions,
    #[sea_orm(has_many = "super::form_teams::Entity")]
    FormTeams,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::likert_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LikertQuestions.def()
    }
}

impl Related<super::open_ended_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenEndedQuestions.def()
    }
}

impl Related<super::form_teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormTeams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，关联的小组需要另查
impl Model {
    pub fn into_form(self, team_ids: Vec<i64>) -> crate::models::forms::entities::CourseForm {
        use crate::models::forms::entities::{CourseForm, FormState};
        use chrono::{DateTime, Utc};

        CourseForm {
            id: self.id,
            course_id: self.course_id,
            name: self.name,
            state: self.state.parse::<FormState>().unwrap_or(FormState::Draft),
            due_at: self
                .due_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            allow_late: self.allow_late,
            self_evaluate: self.self_evaluate,
            colors: vec![
                self.color_1,
                self.color_2,
                self.color_3,
                self.color_4,
                self.color_5,
            ],
            team_ids,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
