//! 李克特量表问题实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "likert_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub form_id: i64,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    pub order: i32,
    pub option_1: String,
    pub option_2: String,
    pub option_3: String,
    pub option_4: String,
    pub option_5: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_forms::Entity",
        from = "Column::FormId",
        to = "super::course_forms::Column::Id"
    )]
    Form,
    #[sea_orm(has_many = "super::likert_responses::Entity")]
    Responses,
}

impl Related<super::course_forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Form.def()
    }
}

impl Related<super::likert_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(self) -> crate::models::forms::entities::LikertQuestion {
        crate::models::forms::entities::LikertQuestion {
            id: self.id,
            form_id: self.form_id,
            prompt: self.prompt,
            order: self.order,
            option_labels: vec![
                self.option_1,
                self.option_2,
                self.option_3,
                self.option_4,
                self.option_5,
            ],
        }
    }
}
