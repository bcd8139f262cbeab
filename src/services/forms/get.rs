use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FormService, load_form};
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course_for_member;

pub async fn get_form(
    service: &FormService,
    request: &HttpRequest,
    form_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let role = RequireJWT::extract_user_role(request);

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

    if let Err(resp) = load_course_for_member(&storage, form.course_id, uid, role.clone()).await {
        return Ok(resp);
    }

    // 草稿表单学生不可见
    if role == Some(UserRole::Student) && form.state == FormState::Draft {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        )));
    }

    match storage.get_form_detail(form_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Form retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get form: {e}"),
            )),
        ),
    }
}
