use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ResponseService;
use crate::middlewares::RequireJWT;
use crate::models::forms::responses::FormDetailResponse;
use crate::models::responses::responses::{
    EvalueeResults, FormResultsResponse, LikertAggregate, OpenEndedAggregate,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;
use crate::services::forms::load_form;
use crate::storage::Storage;

pub async fn form_results(
    service: &ResponseService,
    request: &HttpRequest,
    form_id: i64,
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

    if let Err(resp) = load_owned_course(&storage, form.course_id, uid).await {
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

    // 没有问题的表单无结果可聚合
    if detail.likert_questions.is_empty() && detail.open_ended_questions.is_empty() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Form has no questions",
        )));
    }

    // 被评估人集合：参与本表单的小组成员，team_ids 为空表示全部小组
    let teams = match storage.list_course_teams(form.course_id).await {
        Ok(teams) => teams,
        Err(e) => {
            error!("Failed to list course teams: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list teams: {e}"),
                )),
            );
        }
    };

    let mut evaluees: Vec<User> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for team in teams {
        if !form.team_ids.is_empty() && !form.team_ids.contains(&team.team.id) {
            continue;
        }
        for member in team.members {
            if seen.insert(member.id) {
                evaluees.push(member);
            }
        }
    }

    let mut results = Vec::with_capacity(evaluees.len());
    for evaluee in evaluees {
        match aggregate_for_evaluee(&storage, &detail, &evaluee).await {
            Ok(evaluee_results) => results.push(evaluee_results),
            Err(resp) => return Ok(resp),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        FormResultsResponse {
            form_id,
            evaluees: results,
        },
        "Form results retrieved successfully",
    )))
}

/// 汇总一个被评估人在一张表单下收到的全部回答
pub(crate) async fn aggregate_for_evaluee(
    storage: &Arc<dyn Storage>,
    detail: &FormDetailResponse,
    evaluee: &User,
) -> Result<EvalueeResults, HttpResponse> {
    let mut likert = Vec::with_capacity(detail.likert_questions.len());
    for question in &detail.likert_questions {
        let responses = match storage
            .list_likert_responses_for_evaluee(question.id, evaluee.id)
            .await
        {
            Ok(responses) => responses,
            Err(e) => {
                error!("Failed to list likert responses: {}", e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to aggregate responses: {e}"),
                    )),
                );
            }
        };
        let ratings: Vec<i32> = responses.iter().map(|r| r.rating).collect();
        let (count, mean, distribution) = aggregate_ratings(&ratings);
        likert.push(LikertAggregate {
            question_id: question.id,
            prompt: question.prompt.clone(),
            count,
            mean,
            distribution,
        });
    }

    let mut open_ended = Vec::with_capacity(detail.open_ended_questions.len());
    for question in &detail.open_ended_questions {
        // 存储层已按评估人ID排序
        let responses = match storage
            .list_open_ended_responses_for_evaluee(question.id, evaluee.id)
            .await
        {
            Ok(responses) => responses,
            Err(e) => {
                error!("Failed to list open-ended responses: {}", e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to aggregate responses: {e}"),
                    )),
                );
            }
        };
        open_ended.push(OpenEndedAggregate {
            question_id: question.id,
            prompt: question.prompt.clone(),
            answers: responses.into_iter().map(|r| r.text).collect(),
        });
    }

    Ok(EvalueeResults {
        evaluee_id: evaluee.id,
        evaluee_name: evaluee.profile_name.clone(),
        likert,
        open_ended,
    })
}

/// 评分聚合：回答数、平均分和 1-5 档分布
/// 没有回答时平均分为空而不是 0
fn aggregate_ratings(ratings: &[i32]) -> (i64, Option<f64>, [i64; 5]) {
    let mut distribution = [0i64; 5];
    let mut sum = 0i64;
    let mut count = 0i64;

    for &rating in ratings {
        if (1..=5).contains(&rating) {
            distribution[(rating - 1) as usize] += 1;
            sum += rating as i64;
            count += 1;
        }
    }

    let mean = (count > 0).then(|| sum as f64 / count as f64);
    (count, mean, distribution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_empty_has_no_mean() {
        let (count, mean, distribution) = aggregate_ratings(&[]);
        assert_eq!(count, 0);
        assert_eq!(mean, None);
        assert_eq!(distribution, [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_aggregate_counts_and_mean() {
        let (count, mean, distribution) = aggregate_ratings(&[5, 4, 4, 1]);
        assert_eq!(count, 4);
        assert_eq!(mean, Some(3.5));
        assert_eq!(distribution, [1, 0, 0, 2, 1]);
    }

    #[test]
    fn test_aggregate_single_rating() {
        let (count, mean, distribution) = aggregate_ratings(&[3]);
        assert_eq!(count, 1);
        assert_eq!(mean, Some(3.0));
        assert_eq!(distribution, [0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_aggregate_ignores_out_of_range() {
        let (count, mean, _) = aggregate_ratings(&[0, 6, 3]);
        assert_eq!(count, 1);
        assert_eq!(mean, Some(3.0));
    }
}
