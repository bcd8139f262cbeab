use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FormService, check_teams_in_course, parse_due_at};
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::{DEFAULT_FORM_COLORS, DEFAULT_LIKERT_LABELS};
use crate::models::forms::requests::{CreateFormRequest, FormWriteData, LikertQuestionSeed};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;
use crate::utils::validate::validate_color_set;

pub async fn create_form(
    service: &FormService,
    request: &HttpRequest,
    course_id: i64,
    form_data: CreateFormRequest,
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

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    if form_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Form name must not be empty",
        )));
    }

    // 颜色不填走默认调色板，填则必须恰好 5 个合法颜色
    let colors = match form_data.colors {
        Some(colors) => {
            if let Err(e) = validate_color_set(&colors) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ColorInvalid, e)));
            }
            colors
        }
        None => DEFAULT_FORM_COLORS.iter().map(|s| s.to_string()).collect(),
    };

    let due_at = match form_data.due_at.as_deref() {
        Some(raw) if !raw.is_empty() => match parse_due_at(raw) {
            Ok(ts) => Some(ts),
            Err(resp) => return Ok(resp),
        },
        _ => None,
    };

    if let Err(resp) = check_teams_in_course(&storage, course_id, &form_data.team_ids).await {
        return Ok(resp);
    }

    // 按数量批量生成占位问题，文案走默认值
    let likert: Vec<LikertQuestionSeed> = (0..form_data.num_likert)
        .map(|i| LikertQuestionSeed {
            prompt: format!("Question {}", i + 1),
            option_labels: DEFAULT_LIKERT_LABELS.iter().map(|s| s.to_string()).collect(),
        })
        .collect();
    let open_ended: Vec<String> = (0..form_data.num_open_ended)
        .map(|i| format!("Question {}", form_data.num_likert + i + 1))
        .collect();

    let data = FormWriteData {
        name: form_data.name,
        due_at,
        allow_late: form_data.allow_late,
        self_evaluate: form_data.self_evaluate,
        colors,
        team_ids: form_data.team_ids,
    };

    match storage.create_form(course_id, data, likert, open_ended).await {
        Ok(detail) => {
            info!(
                "Form {} created in course {} by {}",
                detail.form.name, course_id, uid
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Form created successfully")))
        }
        Err(e) => {
            error!("Form creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FormCreationFailed,
                    format!("Form creation failed: {e}"),
                )),
            )
        }
    }
}
