//! 回答存储操作
//!
//! 同一个 (评估人, 被评估人, 问题) 三元组只保留一份回答，
//! 重复提交走覆盖更新，数据库层由唯一索引兜底。

use super::SeaOrmStorage;
use crate::entity::{likert_questions, likert_responses, open_ended_questions, open_ended_responses};
use crate::errors::{CollabRateError, Result};
use crate::models::responses::{
    entities::{LikertResponse, OpenEndedResponse, ResponseKey},
    responses::MyResponsesResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 写入 Likert 回答，同键覆盖旧值
    pub async fn upsert_likert_response_impl(
        &self,
        key: ResponseKey,
        rating: i32,
    ) -> Result<LikertResponse> {
        let now = chrono::Utc::now().timestamp();

        let existing = likert_responses::Entity::find()
            .filter(likert_responses::Column::EvaluatorId.eq(key.evaluator_id))
            .filter(likert_responses::Column::EvalueeId.eq(key.evaluee_id))
            .filter(likert_responses::Column::QuestionId.eq(key.question_id))
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询回答失败: {e}")))?;

        let result = match existing {
            Some(row) => {
                let mut model: likert_responses::ActiveModel = row.into();
                model.answer = Set(rating);
                model.submitted_at = Set(now);
                model.update(&self.db).await.map_err(|e| {
                    CollabRateError::database_operation(format!("更新回答失败: {e}"))
                })?
            }
            None => {
                let model = likert_responses::ActiveModel {
                    evaluator_id: Set(key.evaluator_id),
                    evaluee_id: Set(key.evaluee_id),
                    question_id: Set(key.question_id),
                    answer: Set(rating),
                    submitted_at: Set(now),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    CollabRateError::database_operation(format!("写入回答失败: {e}"))
                })?
            }
        };

        Ok(result.into_response())
    }

    /// 写入开放问题回答，同键覆盖旧值
    pub async fn upsert_open_ended_response_impl(
        &self,
        key: ResponseKey,
        text: &str,
    ) -> Result<OpenEndedResponse> {
        let now = chrono::Utc::now().timestamp();

        let existing = open_ended_responses::Entity::find()
            .filter(open_ended_responses::Column::EvaluatorId.eq(key.evaluator_id))
            .filter(open_ended_responses::Column::EvalueeId.eq(key.evaluee_id))
            .filter(open_ended_responses::Column::QuestionId.eq(key.question_id))
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询回答失败: {e}")))?;

        let result = match existing {
            Some(row) => {
                let mut model: open_ended_responses::ActiveModel = row.into();
                model.answer = Set(text.to_string());
                model.submitted_at = Set(now);
                model.update(&self.db).await.map_err(|e| {
                    CollabRateError::database_operation(format!("更新回答失败: {e}"))
                })?
            }
            None => {
                let model = open_ended_responses::ActiveModel {
                    evaluator_id: Set(key.evaluator_id),
                    evaluee_id: Set(key.evaluee_id),
                    question_id: Set(key.question_id),
                    answer: Set(text.to_string()),
                    submitted_at: Set(now),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    CollabRateError::database_operation(format!("写入回答失败: {e}"))
                })?
            }
        };

        Ok(result.into_response())
    }

    /// 查询自己在一张表单下对某人的全部回答
    pub async fn list_my_responses_impl(
        &self,
        form_id: i64,
        evaluator_id: i64,
        evaluee_id: i64,
    ) -> Result<MyResponsesResponse> {
        let likert = likert_responses::Entity::find()
            .join(
                JoinType::InnerJoin,
                likert_responses::Relation::Question.def(),
            )
            .filter(likert_questions::Column::FormId.eq(form_id))
            .filter(likert_responses::Column::EvaluatorId.eq(evaluator_id))
            .filter(likert_responses::Column::EvalueeId.eq(evaluee_id))
            .order_by_asc(likert_responses::Column::QuestionId)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询回答失败: {e}")))?;

        let open_ended = open_ended_responses::Entity::find()
            .join(
                JoinType::InnerJoin,
                open_ended_responses::Relation::Question.def(),
            )
            .filter(open_ended_questions::Column::FormId.eq(form_id))
            .filter(open_ended_responses::Column::EvaluatorId.eq(evaluator_id))
            .filter(open_ended_responses::Column::EvalueeId.eq(evaluee_id))
            .order_by_asc(open_ended_responses::Column::QuestionId)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询回答失败: {e}")))?;

        Ok(MyResponsesResponse {
            evaluee_id,
            likert: likert.into_iter().map(|m| m.into_response()).collect(),
            open_ended: open_ended.into_iter().map(|m| m.into_response()).collect(),
        })
    }

    /// 某个量表问题下某人收到的全部回答
    pub async fn list_likert_responses_for_evaluee_impl(
        &self,
        question_id: i64,
        evaluee_id: i64,
    ) -> Result<Vec<LikertResponse>> {
        let rows = likert_responses::Entity::find()
            .filter(likert_responses::Column::QuestionId.eq(question_id))
            .filter(likert_responses::Column::EvalueeId.eq(evaluee_id))
            .order_by_asc(likert_responses::Column::EvaluatorId)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询回答失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_response()).collect())
    }

    /// 某个开放问题下某人收到的全部回答，按评估人 ID 排序
    pub async fn list_open_ended_responses_for_evaluee_impl(
        &self,
        question_id: i64,
        evaluee_id: i64,
    ) -> Result<Vec<OpenEndedResponse>> {
        let rows = open_ended_responses::Entity::find()
            .filter(open_ended_responses::Column::QuestionId.eq(question_id))
            .filter(open_ended_responses::Column::EvalueeId.eq(evaluee_id))
            .order_by_asc(open_ended_responses::Column::EvaluatorId)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询回答失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_response()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{course_forms, courses, users};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    // 内存库 + 迁移 + 最小数据集：一个教授、三个学生、一张表单、一道量表题、一道开放题
    async fn storage_with_fixtures() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        let storage = SeaOrmStorage { db };

        let now = chrono::Utc::now().timestamp();
        for (id, name) in [(1, "prof"), (2, "alice"), (3, "bob"), (4, "carol")] {
            let user = users::ActiveModel {
                id: Set(id),
                username: Set(name.to_string()),
                email: Set(format!("{name}@example.edu")),
                oauth_subject: Set(format!("sub-{name}")),
                role: Set(if id == 1 { "professor" } else { "student" }.to_string()),
                status: Set("active".to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            user.insert(&storage.db).await.expect("insert user");
        }

        let course = courses::ActiveModel {
            id: Set(1),
            professor_id: Set(1),
            join_code: Set("ABC123".to_string()),
            code: Set("CSCI2254".to_string()),
            title: Set("Web Application Development".to_string()),
            semester: Set("fall".to_string()),
            year: Set(2026),
            color: Set("#3498db".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        course.insert(&storage.db).await.expect("insert course");

        let form = course_forms::ActiveModel {
            id: Set(1),
            course_id: Set(1),
            name: Set("Sprint 1 Peer Review".to_string()),
            state: Set("published".to_string()),
            due_at: Set(None),
            allow_late: Set(false),
            self_evaluate: Set(false),
            color_1: Set("#872729".to_string()),
            color_2: Set("#C44B4B".to_string()),
            color_3: Set("#F2F0EF".to_string()),
            color_4: Set("#3D5A80".to_string()),
            color_5: Set("#293241".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        form.insert(&storage.db).await.expect("insert form");

        let likert = likert_questions::ActiveModel {
            id: Set(10),
            form_id: Set(1),
            prompt: Set("Communicates clearly".to_string()),
            order: Set(0),
            option_1: Set("Strongly Disagree".to_string()),
            option_2: Set("Disagree".to_string()),
            option_3: Set("Neutral".to_string()),
            option_4: Set("Agree".to_string()),
            option_5: Set("Strongly Agree".to_string()),
        };
        likert.insert(&storage.db).await.expect("insert question");

        let open = open_ended_questions::ActiveModel {
            id: Set(20),
            form_id: Set(1),
            prompt: Set("What should they keep doing?".to_string()),
            order: Set(0),
        };
        open.insert(&storage.db).await.expect("insert question");

        storage
    }

    fn key(evaluator_id: i64, evaluee_id: i64, question_id: i64) -> ResponseKey {
        ResponseKey {
            evaluator_id,
            evaluee_id,
            question_id,
        }
    }

    #[tokio::test]
    async fn resubmit_overwrites_instead_of_duplicating() {
        let storage = storage_with_fixtures().await;

        let first = storage
            .upsert_likert_response_impl(key(2, 3, 10), 2)
            .await
            .unwrap();
        let second = storage
            .upsert_likert_response_impl(key(2, 3, 10), 5)
            .await
            .unwrap();

        // 同一行被更新，不产生新行
        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 5);

        let received = storage
            .list_likert_responses_for_evaluee_impl(10, 3)
            .await
            .unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].rating, 5);
    }

    #[tokio::test]
    async fn distinct_keys_stay_separate() {
        let storage = storage_with_fixtures().await;

        // 同一评估人对不同被评估人，以及不同评估人对同一被评估人，互不影响
        storage
            .upsert_likert_response_impl(key(2, 3, 10), 3)
            .await
            .unwrap();
        storage
            .upsert_likert_response_impl(key(2, 4, 10), 4)
            .await
            .unwrap();
        storage
            .upsert_likert_response_impl(key(4, 3, 10), 5)
            .await
            .unwrap();

        let for_bob = storage
            .list_likert_responses_for_evaluee_impl(10, 3)
            .await
            .unwrap();
        assert_eq!(for_bob.len(), 2);

        let for_carol = storage
            .list_likert_responses_for_evaluee_impl(10, 4)
            .await
            .unwrap();
        assert_eq!(for_carol.len(), 1);
        assert_eq!(for_carol[0].rating, 4);
    }

    #[tokio::test]
    async fn open_ended_resubmit_overwrites_text() {
        let storage = storage_with_fixtures().await;

        storage
            .upsert_open_ended_response_impl(key(2, 3, 20), "good teammate")
            .await
            .unwrap();
        let updated = storage
            .upsert_open_ended_response_impl(key(2, 3, 20), "great teammate")
            .await
            .unwrap();
        assert_eq!(updated.text, "great teammate");

        let received = storage
            .list_open_ended_responses_for_evaluee_impl(20, 3)
            .await
            .unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].text, "great teammate");
    }

    #[tokio::test]
    async fn open_ended_answers_ordered_by_evaluator() {
        let storage = storage_with_fixtures().await;

        storage
            .upsert_open_ended_response_impl(key(4, 3, 20), "from carol")
            .await
            .unwrap();
        storage
            .upsert_open_ended_response_impl(key(2, 3, 20), "from alice")
            .await
            .unwrap();

        let received = storage
            .list_open_ended_responses_for_evaluee_impl(20, 3)
            .await
            .unwrap();
        let evaluators: Vec<i64> = received.iter().map(|r| r.key.evaluator_id).collect();
        assert_eq!(evaluators, vec![2, 4]);
    }

    #[tokio::test]
    async fn my_responses_scoped_to_form_and_pair() {
        let storage = storage_with_fixtures().await;

        storage
            .upsert_likert_response_impl(key(2, 3, 10), 4)
            .await
            .unwrap();
        storage
            .upsert_open_ended_response_impl(key(2, 3, 20), "keep it up")
            .await
            .unwrap();
        storage
            .upsert_likert_response_impl(key(2, 4, 10), 1)
            .await
            .unwrap();

        let mine = storage.list_my_responses_impl(1, 2, 3).await.unwrap();
        assert_eq!(mine.likert.len(), 1);
        assert_eq!(mine.likert[0].rating, 4);
        assert_eq!(mine.open_ended.len(), 1);
        assert_eq!(mine.open_ended[0].text, "keep it up");

        let none = storage.list_my_responses_impl(1, 3, 2).await.unwrap();
        assert!(none.likert.is_empty());
        assert!(none.open_ended.is_empty());
    }
}
