use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResponseService;
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::forms::load_form;

pub async fn my_responses(
    service: &ResponseService,
    request: &HttpRequest,
    form_id: i64,
    evaluee_id: i64,
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

    // 草稿表单学生不可见
    if form.state == FormState::Draft {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        )));
    }

    match storage.list_my_responses(form_id, uid, evaluee_id).await {
        Ok(responses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            responses,
            "Responses retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve responses: {e}"),
            )),
        ),
    }
}
