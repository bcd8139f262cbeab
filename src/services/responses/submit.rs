use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ResponseService;
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::forms::responses::FormDetailResponse;
use crate::models::responses::entities::ResponseKey;
use crate::models::responses::requests::SubmitResponsesRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::forms::load_form;
use crate::storage::Storage;
use crate::utils::validate::validate_rating;

pub async fn submit_responses(
    service: &ResponseService,
    request: &HttpRequest,
    form_id: i64,
    submit_data: SubmitResponsesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let form = match load_form(&storage, form_id).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };

    // 仅已发布的表单接受提交
    if form.state != FormState::Published {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::FormNotPublished,
            "Form is not accepting submissions",
        )));
    }

    if deadline_blocks(form.due_at, form.allow_late, chrono::Utc::now()) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::DeadlinePassed,
            "The deadline for this form has passed",
        )));
    }

    // 评估人必须已加入课程
    match storage.is_student_enrolled(form.course_id, uid).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "You are not enrolled in this course",
            )));
        }
        Err(e) => {
            error!("Failed to check enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check enrollment: {e}"),
                )),
            );
        }
    }

    // 评估对检查：自评/互评模式与小组范围
    if let Err(resp) = check_evaluation_pair(&storage, &form, uid, submit_data.evaluee_id).await {
        return Ok(resp);
    }

    let detail = match storage.get_form_detail(form_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FormNotFound,
                "Form not found",
            )));
        }
        Err(e) => {
            error!("Failed to get form detail: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get form: {e}"),
                )),
            );
        }
    };

    // 整页校验通过后才写入任何一条回答
    if let Err(resp) = validate_answers(&detail, &submit_data) {
        return Ok(resp);
    }

    for answer in &submit_data.likert {
        let key = ResponseKey {
            evaluator_id: uid,
            evaluee_id: submit_data.evaluee_id,
            question_id: answer.question_id,
        };
        if let Err(e) = storage.upsert_likert_response(key, answer.rating).await {
            error!("Failed to save likert response: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ResponseSubmitFailed,
                    format!("Failed to save responses: {e}"),
                )),
            );
        }
    }

    for answer in &submit_data.open_ended {
        let key = ResponseKey {
            evaluator_id: uid,
            evaluee_id: submit_data.evaluee_id,
            question_id: answer.question_id,
        };
        if let Err(e) = storage.upsert_open_ended_response(key, &answer.text).await {
            error!("Failed to save open-ended response: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ResponseSubmitFailed,
                    format!("Failed to save responses: {e}"),
                )),
            );
        }
    }

    info!(
        "User {} submitted {} likert and {} open-ended responses for evaluee {} on form {}",
        uid,
        submit_data.likert.len(),
        submit_data.open_ended.len(),
        submit_data.evaluee_id,
        form_id
    );

    match storage
        .list_my_responses(form_id, uid, submit_data.evaluee_id)
        .await
    {
        Ok(responses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            responses,
            "Responses submitted successfully",
        ))),
        Err(e) => {
            error!("Failed to read back responses: {}", e);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Responses submitted successfully",
            )))
        }
    }
}

/// 评估对校验：
/// - 自评表单：评估人和被评估人必须是同一人
/// - 互评表单：两人必须不同且同组，评估人所在小组须参与本表单
async fn check_evaluation_pair(
    storage: &Arc<dyn Storage>,
    form: &crate::models::forms::entities::CourseForm,
    evaluator_id: i64,
    evaluee_id: i64,
) -> Result<(), HttpResponse> {
    if let Some(message) = evaluation_mode_error(form.self_evaluate, evaluator_id, evaluee_id) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EvaluationPairInvalid,
            message,
        )));
    }

    let team = match storage
        .get_user_team_in_course(form.course_id, evaluator_id)
        .await
    {
        Ok(Some(team)) => team,
        Ok(None) => {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::EvaluationPairInvalid,
                "You are not on a team in this course",
            )));
        }
        Err(e) => {
            error!("Failed to get user team: {}", e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get team: {e}"),
                )),
            );
        }
    };

    // team_ids 为空表示课程内全部小组参与
    if !form.team_ids.is_empty() && !form.team_ids.contains(&team.id) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EvaluationPairInvalid,
            "Your team is not part of this form",
        )));
    }

    // 自评只需在参与小组中，互评还需同组
    if evaluee_id == evaluator_id {
        return Ok(());
    }

    let member_ids = match storage.list_team_member_ids(team.id).await {
        Ok(ids) => ids,
        Err(e) => {
            error!("Failed to list team members: {}", e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list team members: {e}"),
                )),
            );
        }
    };

    if !member_ids.contains(&evaluee_id) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EvaluationPairInvalid,
            "Evaluee is not a member of your team",
        )));
    }

    Ok(())
}

/// 截止时间检查，allow_late 开启时逾期仍可提交
fn deadline_blocks(
    due_at: Option<chrono::DateTime<chrono::Utc>>,
    allow_late: bool,
    now: chrono::DateTime<chrono::Utc>,
) -> bool {
    matches!(due_at, Some(due) if now > due && !allow_late)
}

/// 自评表单只接受对自己的回答，互评表单只接受对他人的回答
fn evaluation_mode_error(
    self_evaluate: bool,
    evaluator_id: i64,
    evaluee_id: i64,
) -> Option<&'static str> {
    if self_evaluate && evaluee_id != evaluator_id {
        return Some("This form only accepts self-evaluation");
    }
    if !self_evaluate && evaluee_id == evaluator_id {
        return Some("This form does not accept self-evaluation");
    }
    None
}

/// 整页回答校验：问题必须属于本表单、不得重复，评分在 1-5 档
fn validate_answers(
    detail: &FormDetailResponse,
    submit_data: &SubmitResponsesRequest,
) -> Result<(), HttpResponse> {
    let likert_ids: HashSet<i64> = detail.likert_questions.iter().map(|q| q.id).collect();
    let open_ids: HashSet<i64> = detail.open_ended_questions.iter().map(|q| q.id).collect();

    let mut seen = HashSet::new();
    for answer in &submit_data.likert {
        if !likert_ids.contains(&answer.question_id) {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                format!("Question {} does not belong to this form", answer.question_id),
            )));
        }
        if !seen.insert(answer.question_id) {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ResponseValidationFailed,
                format!("Duplicate answer for question {}", answer.question_id),
            )));
        }
        if let Err(e) = validate_rating(answer.rating) {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ResponseValidationFailed,
                e,
            )));
        }
    }

    let mut seen = HashSet::new();
    for answer in &submit_data.open_ended {
        if !open_ids.contains(&answer.question_id) {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                format!("Question {} does not belong to this form", answer.question_id),
            )));
        }
        if !seen.insert(answer.question_id) {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ResponseValidationFailed,
                format!("Duplicate answer for question {}", answer.question_id),
            )));
        }
        // 开放回答允许为空串，覆盖旧回答即视为清空
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::models::forms::entities::{
        CourseForm, DEFAULT_FORM_COLORS, DEFAULT_LIKERT_LABELS, LikertQuestion, OpenEndedQuestion,
    };
    use crate::models::responses::requests::{LikertAnswerInput, OpenEndedAnswerInput};

    fn form_detail() -> FormDetailResponse {
        let now = Utc::now();
        FormDetailResponse {
            form: CourseForm {
                id: 1,
                course_id: 1,
                name: "Sprint review".to_string(),
                state: FormState::Published,
                due_at: None,
                allow_late: false,
                self_evaluate: false,
                colors: DEFAULT_FORM_COLORS.iter().map(|c| c.to_string()).collect(),
                team_ids: vec![],
                created_at: now,
                updated_at: now,
            },
            likert_questions: vec![
                LikertQuestion {
                    id: 10,
                    form_id: 1,
                    prompt: "Communicates clearly".to_string(),
                    order: 0,
                    option_labels: DEFAULT_LIKERT_LABELS.iter().map(|l| l.to_string()).collect(),
                },
                LikertQuestion {
                    id: 11,
                    form_id: 1,
                    prompt: "Delivers on time".to_string(),
                    order: 1,
                    option_labels: DEFAULT_LIKERT_LABELS.iter().map(|l| l.to_string()).collect(),
                },
            ],
            open_ended_questions: vec![OpenEndedQuestion {
                id: 20,
                form_id: 1,
                prompt: "What went well?".to_string(),
                order: 0,
            }],
        }
    }

    #[test]
    fn test_self_evaluation_form_rejects_peers() {
        assert!(evaluation_mode_error(true, 1, 2).is_some());
        assert!(evaluation_mode_error(true, 1, 1).is_none());
    }

    #[test]
    fn test_peer_evaluation_form_rejects_self() {
        assert!(evaluation_mode_error(false, 1, 1).is_some());
        assert!(evaluation_mode_error(false, 1, 2).is_none());
    }

    #[test]
    fn test_overdue_form_blocks_submission() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(1));
        assert!(deadline_blocks(past, false, now));
    }

    #[test]
    fn test_overdue_form_accepts_late_submission_when_allowed() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(1));
        assert!(!deadline_blocks(past, true, now));
    }

    #[test]
    fn test_open_deadline_accepts_submission() {
        let now = Utc::now();
        assert!(!deadline_blocks(None, false, now));
        assert!(!deadline_blocks(Some(now + Duration::hours(1)), false, now));
    }

    #[test]
    fn test_out_of_range_rating_rejects_whole_page() {
        let detail = form_detail();
        // 一个合法回答搭配一个越界评分，整页都应被拒绝
        let submit_data = SubmitResponsesRequest {
            evaluee_id: 2,
            likert: vec![
                LikertAnswerInput {
                    question_id: 10,
                    rating: 4,
                },
                LikertAnswerInput {
                    question_id: 11,
                    rating: 6,
                },
            ],
            open_ended: vec![],
        };
        assert!(validate_answers(&detail, &submit_data).is_err());
    }

    #[test]
    fn test_answer_for_foreign_question_rejected() {
        let detail = form_detail();
        let submit_data = SubmitResponsesRequest {
            evaluee_id: 2,
            likert: vec![LikertAnswerInput {
                question_id: 99,
                rating: 3,
            }],
            open_ended: vec![],
        };
        assert!(validate_answers(&detail, &submit_data).is_err());
    }

    #[test]
    fn test_duplicate_answer_rejected() {
        let detail = form_detail();
        let submit_data = SubmitResponsesRequest {
            evaluee_id: 2,
            likert: vec![],
            open_ended: vec![
                OpenEndedAnswerInput {
                    question_id: 20,
                    text: "Good pacing".to_string(),
                },
                OpenEndedAnswerInput {
                    question_id: 20,
                    text: "Said twice".to_string(),
                },
            ],
        };
        assert!(validate_answers(&detail, &submit_data).is_err());
    }

    #[test]
    fn test_valid_page_passes_validation() {
        let detail = form_detail();
        let submit_data = SubmitResponsesRequest {
            evaluee_id: 2,
            likert: vec![
                LikertAnswerInput {
                    question_id: 10,
                    rating: 5,
                },
                LikertAnswerInput {
                    question_id: 11,
                    rating: 2,
                },
            ],
            open_ended: vec![OpenEndedAnswerInput {
                question_id: 20,
                text: String::new(),
            }],
        };
        assert!(validate_answers(&detail, &submit_data).is_ok());
    }
}
