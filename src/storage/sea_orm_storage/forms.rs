//! 表单与问题存储操作

use super::SeaOrmStorage;
use crate::entity::course_forms::{ActiveModel, Column, Entity as CourseForms};
use crate::entity::{form_teams, likert_questions, open_ended_questions};
use crate::errors::{CollabRateError, Result};
use crate::models::forms::{
    entities::{CourseForm, FormState, LikertQuestion, OpenEndedQuestion},
    requests::{FormUpdateData, FormWriteData, LikertQuestionSeed},
    responses::FormDetailResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 表单关联的小组 ID
    async fn form_team_ids(&self, form_id: i64) -> Result<Vec<i64>> {
        let rows = form_teams::Entity::find()
            .filter(form_teams::Column::FormId.eq(form_id))
            .order_by_asc(form_teams::Column::TeamId)
            .all(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("查询表单小组失败: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.team_id).collect())
    }

    /// 整组替换表单关联的小组
    async fn set_form_teams(&self, form_id: i64, team_ids: &[i64]) -> Result<()> {
        form_teams::Entity::delete_many()
            .filter(form_teams::Column::FormId.eq(form_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("清空表单小组失败: {e}"))
            })?;

        if team_ids.is_empty() {
            return Ok(());
        }

        let rows: Vec<form_teams::ActiveModel> = team_ids
            .iter()
            .map(|&team_id| form_teams::ActiveModel {
                form_id: Set(form_id),
                team_id: Set(team_id),
                ..Default::default()
            })
            .collect();

        form_teams::Entity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("写入表单小组失败: {e}"))
            })?;

        Ok(())
    }

    /// 按顺序写入问题
    async fn insert_questions(
        &self,
        form_id: i64,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<()> {
        for (i, seed) in likert.into_iter().enumerate() {
            let mut labels = seed.option_labels.into_iter();
            let model = likert_questions::ActiveModel {
                form_id: Set(form_id),
                prompt: Set(seed.prompt),
                order: Set(i as i32),
                option_1: Set(labels.next().unwrap_or_default()),
                option_2: Set(labels.next().unwrap_or_default()),
                option_3: Set(labels.next().unwrap_or_default()),
                option_4: Set(labels.next().unwrap_or_default()),
                option_5: Set(labels.next().unwrap_or_default()),
                ..Default::default()
            };
            model.insert(&self.db).await.map_err(|e| {
                CollabRateError::database_operation(format!("创建量表问题失败: {e}"))
            })?;
        }

        for (i, prompt) in open_ended.into_iter().enumerate() {
            let model = open_ended_questions::ActiveModel {
                form_id: Set(form_id),
                prompt: Set(prompt),
                order: Set(i as i32),
                ..Default::default()
            };
            model.insert(&self.db).await.map_err(|e| {
                CollabRateError::database_operation(format!("创建开放问题失败: {e}"))
            })?;
        }

        Ok(())
    }

    /// 创建表单及其问题
    pub async fn create_form_impl(
        &self,
        course_id: i64,
        data: FormWriteData,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<FormDetailResponse> {
        let now = chrono::Utc::now().timestamp();
        let mut colors = data.colors.into_iter();

        let model = ActiveModel {
            course_id: Set(course_id),
            name: Set(data.name),
            state: Set(FormState::Draft.to_string()),
            due_at: Set(data.due_at),
            allow_late: Set(data.allow_late),
            self_evaluate: Set(data.self_evaluate),
            color_1: Set(colors.next().unwrap_or_default()),
            color_2: Set(colors.next().unwrap_or_default()),
            color_3: Set(colors.next().unwrap_or_default()),
            color_4: Set(colors.next().unwrap_or_default()),
            color_5: Set(colors.next().unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let form = model
            .insert(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("创建表单失败: {e}")))?;

        self.set_form_teams(form.id, &data.team_ids).await?;
        self.insert_questions(form.id, likert, open_ended).await?;

        self.get_form_detail_impl(form.id)
            .await?
            .ok_or_else(|| CollabRateError::database_operation("表单创建后查询失败"))
    }

    /// 通过 ID 获取表单
    pub async fn get_form_by_id_impl(&self, form_id: i64) -> Result<Option<CourseForm>> {
        let result = CourseForms::find_by_id(form_id)
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询表单失败: {e}")))?;

        match result {
            Some(m) => {
                let team_ids = self.form_team_ids(form_id).await?;
                Ok(Some(m.into_form(team_ids)))
            }
            None => Ok(None),
        }
    }

    /// 获取表单及其问题
    pub async fn get_form_detail_impl(&self, form_id: i64) -> Result<Option<FormDetailResponse>> {
        let form = match self.get_form_by_id_impl(form_id).await? {
            Some(f) => f,
            None => return Ok(None),
        };

        let likert = likert_questions::Entity::find()
            .filter(likert_questions::Column::FormId.eq(form_id))
            .order_by_asc(likert_questions::Column::Order)
            .all(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("查询量表问题失败: {e}"))
            })?;

        let open_ended = open_ended_questions::Entity::find()
            .filter(open_ended_questions::Column::FormId.eq(form_id))
            .order_by_asc(open_ended_questions::Column::Order)
            .all(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("查询开放问题失败: {e}"))
            })?;

        Ok(Some(FormDetailResponse {
            form,
            likert_questions: likert.into_iter().map(|m| m.into_question()).collect(),
            open_ended_questions: open_ended.into_iter().map(|m| m.into_question()).collect(),
        }))
    }

    /// 列出课程下的表单
    pub async fn list_course_forms_impl(&self, course_id: i64) -> Result<Vec<CourseForm>> {
        let forms = CourseForms::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询表单列表失败: {e}")))?;

        let mut out = Vec::with_capacity(forms.len());
        for form in forms {
            let team_ids = self.form_team_ids(form.id).await?;
            out.push(form.into_form(team_ids));
        }
        Ok(out)
    }

    /// 更新表单基本信息
    pub async fn update_form_impl(
        &self,
        form_id: i64,
        update: FormUpdateData,
    ) -> Result<Option<CourseForm>> {
        let existing = self.get_form_by_id_impl(form_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(form_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(due_at) = update.due_at {
            model.due_at = Set(due_at);
        }

        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }

        if let Some(self_evaluate) = update.self_evaluate {
            model.self_evaluate = Set(self_evaluate);
        }

        if let Some(colors) = update.colors {
            let mut colors = colors.into_iter();
            model.color_1 = Set(colors.next().unwrap_or_default());
            model.color_2 = Set(colors.next().unwrap_or_default());
            model.color_3 = Set(colors.next().unwrap_or_default());
            model.color_4 = Set(colors.next().unwrap_or_default());
            model.color_5 = Set(colors.next().unwrap_or_default());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("更新表单失败: {e}")))?;

        if let Some(ref team_ids) = update.team_ids {
            self.set_form_teams(form_id, team_ids).await?;
        }

        self.get_form_by_id_impl(form_id).await
    }

    /// 推进表单状态
    pub async fn set_form_state_impl(&self, form_id: i64, state: FormState) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = CourseForms::update_many()
            .col_expr(
                Column::State,
                sea_orm::sea_query::Expr::value(state.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(form_id))
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("更新表单状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 整组替换表单问题，旧问题连同回答级联删除
    pub async fn replace_form_questions_impl(
        &self,
        form_id: i64,
        likert: Vec<LikertQuestionSeed>,
        open_ended: Vec<String>,
    ) -> Result<Option<FormDetailResponse>> {
        let existing = self.get_form_by_id_impl(form_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        likert_questions::Entity::delete_many()
            .filter(likert_questions::Column::FormId.eq(form_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("删除旧量表问题失败: {e}"))
            })?;

        open_ended_questions::Entity::delete_many()
            .filter(open_ended_questions::Column::FormId.eq(form_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("删除旧开放问题失败: {e}"))
            })?;

        self.insert_questions(form_id, likert, open_ended).await?;

        self.get_form_detail_impl(form_id).await
    }

    /// 删除表单
    pub async fn delete_form_impl(&self, form_id: i64) -> Result<bool> {
        let result = CourseForms::delete_by_id(form_id)
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("删除表单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取单个量表问题
    pub async fn get_likert_question_impl(
        &self,
        question_id: i64,
    ) -> Result<Option<LikertQuestion>> {
        let result = likert_questions::Entity::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("查询量表问题失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 获取单个开放问题
    pub async fn get_open_ended_question_impl(
        &self,
        question_id: i64,
    ) -> Result<Option<OpenEndedQuestion>> {
        let result = open_ended_questions::Entity::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                CollabRateError::database_operation(format!("查询开放问题失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_question()))
    }
}
