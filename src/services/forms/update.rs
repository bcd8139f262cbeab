use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FormService, check_teams_in_course, load_form, parse_due_at};
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::forms::requests::{FormUpdateData, UpdateFormRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;
use crate::utils::validate::validate_color_set;

pub async fn update_form(
    service: &FormService,
    request: &HttpRequest,
    form_id: i64,
    update_data: UpdateFormRequest,
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

    // 发布后表单内容冻结
    if form.state != FormState::Draft {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::FormStateInvalid,
            "Only draft forms can be updated",
        )));
    }

    if let Some(name) = &update_data.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Form name must not be empty",
        )));
    }

    if let Some(colors) = &update_data.colors
        && let Err(e) = validate_color_set(colors)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ColorInvalid, e)));
    }

    // 空字符串清空截止时间
    let due_at = match update_data.due_at.as_deref() {
        Some("") => Some(None),
        Some(raw) => match parse_due_at(raw) {
            Ok(ts) => Some(Some(ts)),
            Err(resp) => return Ok(resp),
        },
        None => None,
    };

    if let Some(team_ids) = &update_data.team_ids
        && let Err(resp) = check_teams_in_course(&storage, form.course_id, team_ids).await
    {
        return Ok(resp);
    }

    let update = FormUpdateData {
        name: update_data.name,
        due_at,
        allow_late: update_data.allow_late,
        self_evaluate: update_data.self_evaluate,
        colors: update_data.colors,
        team_ids: update_data.team_ids,
    };

    match storage.update_form(form_id, update).await {
        Ok(Some(form)) => {
            info!("Form {} updated successfully by {}", form_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(form, "Form updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        ))),
        Err(e) => {
            error!("Failed to update form {}: {}", form_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update form: {e}"),
                )),
            )
        }
    }
}
