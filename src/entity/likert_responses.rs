//! 李克特回答实体
//!
//! (evaluator_id, evaluee_id, question_id) 三元组上有唯一索引，
//! 重复提交走覆盖更新而不是插入。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "likert_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluator_id: i64,
    pub evaluee_id: i64,
    pub question_id: i64,
    pub answer: i32,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvalueeId",
        to = "super::users::Column::Id"
    )]
    Evaluee,
    #[sea_orm(
        belongs_to = "super::likert_questions::Entity",
        from = "Column::QuestionId",
        to = "super::likert_questions::Column::Id"
    )]
    Question,
}

impl Related<super::likert_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_response(self) -> crate::models::responses::entities::LikertResponse {
        use crate::models::responses::entities::{LikertResponse, ResponseKey};
        use chrono::{DateTime, Utc};

        LikertResponse {
            id: self.id,
            key: ResponseKey {
                evaluator_id: self.evaluator_id,
                evaluee_id: self.evaluee_id,
                question_id: self.question_id,
            },
            rating: self.answer,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0).unwrap_or_default(),
        }
    }
}
