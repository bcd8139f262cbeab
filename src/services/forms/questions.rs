use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FormService, load_form};
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::{DEFAULT_LIKERT_LABELS, FormState};
use crate::models::forms::requests::{LikertQuestionSeed, RebuildQuestionsRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;
use crate::utils::validate::validate_option_labels;

/// 草稿态下整组替换表单问题，顺序按数组下标
pub async fn rebuild_questions(
    service: &FormService,
    request: &HttpRequest,
    form_id: i64,
    rebuild_data: RebuildQuestionsRequest,
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

    if form.state != FormState::Draft {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::FormStateInvalid,
            "Questions can only be rebuilt while the form is a draft",
        )));
    }

    let mut likert = Vec::with_capacity(rebuild_data.likert.len());
    for input in rebuild_data.likert {
        if input.prompt.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Question prompt must not be empty",
            )));
        }
        let option_labels = match input.option_labels {
            Some(labels) => {
                if let Err(e) = validate_option_labels(&labels) {
                    return Ok(HttpResponse::BadRequest()
                        .json(ApiResponse::error_empty(ErrorCode::BadRequest, e)));
                }
                labels
            }
            None => DEFAULT_LIKERT_LABELS.iter().map(|s| s.to_string()).collect(),
        };
        likert.push(LikertQuestionSeed {
            prompt: input.prompt,
            option_labels,
        });
    }

    let mut open_ended = Vec::with_capacity(rebuild_data.open_ended.len());
    for input in rebuild_data.open_ended {
        if input.prompt.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Question prompt must not be empty",
            )));
        }
        open_ended.push(input.prompt);
    }

    match storage
        .replace_form_questions(form_id, likert, open_ended)
        .await
    {
        Ok(Some(detail)) => {
            info!("Questions rebuilt for form {} by {}", form_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Questions rebuilt successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        ))),
        Err(e) => {
            error!("Failed to rebuild questions for form {}: {}", form_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to rebuild questions: {e}"),
                )),
            )
        }
    }
}
