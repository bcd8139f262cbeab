use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ResponseService;
use super::results::aggregate_for_evaluee;
use crate::middlewares::RequireJWT;
use crate::models::forms::entities::FormState;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::forms::load_form;

// 学生查看自己收到的聚合结果，仅结果已公布的表单可见
pub async fn my_results(
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

    if form.state != FormState::Released {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::FormStateInvalid,
            "Results have not been released for this form",
        )));
    }

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

    let user = match storage.get_user_by_id(uid).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            error!("Failed to get user {}: {}", uid, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get user: {e}"),
                )),
            );
        }
    };

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

    if detail.likert_questions.is_empty() && detail.open_ended_questions.is_empty() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Form has no questions",
        )));
    }

    match aggregate_for_evaluee(&storage, &detail, &user).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            results,
            "Received results retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
