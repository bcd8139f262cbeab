use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FormService;
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course_for_member;

pub async fn list_course_forms(
    service: &FormService,
    request: &HttpRequest,
    course_id: i64,
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

    if let Err(resp) = load_course_for_member(&storage, course_id, uid, role.clone()).await {
        return Ok(resp);
    }

    match storage.list_course_forms(course_id).await {
        Ok(mut forms) => {
            // 草稿表单学生不可见
            if role == Some(UserRole::Student) {
                forms.retain(|form| form.state != FormState::Draft);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                forms,
                "Form list retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve form list: {e}"),
            )),
        ),
    }
}
