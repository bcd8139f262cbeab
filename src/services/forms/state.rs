use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FormService, load_form};
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;

// 发布表单：draft -> published
pub async fn publish_form(
    service: &FormService,
    request: &HttpRequest,
    form_id: i64,
) -> ActixResult<HttpResponse> {
    advance_state(
        service,
        request,
        form_id,
        FormState::Draft,
        FormState::Published,
        "Form published successfully",
    )
    .await
}

// 公布结果：published -> released
pub async fn release_form(
    service: &FormService,
    request: &HttpRequest,
    form_id: i64,
) -> ActixResult<HttpResponse> {
    advance_state(
        service,
        request,
        form_id,
        FormState::Published,
        FormState::Released,
        "Form results released successfully",
    )
    .await
}

/// 状态只能向前推进：draft -> published -> released
async fn advance_state(
    service: &FormService,
    request: &HttpRequest,
    form_id: i64,
    expected: FormState,
    target: FormState,
    success_message: &str,
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

    if form.state != expected {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::FormStateInvalid,
            format!("Form must be {expected} to move to {target}, current state is {}", form.state),
        )));
    }

    match storage.set_form_state(form_id, target.clone()).await {
        Ok(true) => {
            info!("Form {} moved to {} by {}", form_id, target, uid);
            match storage.get_form_by_id(form_id).await {
                Ok(Some(form)) => {
                    Ok(HttpResponse::Ok().json(ApiResponse::success(form, success_message)))
                }
                _ => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(success_message))),
            }
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        ))),
        Err(e) => {
            error!("Failed to change state of form {}: {}", form_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to change form state: {e}"),
                )),
            )
        }
    }
}
