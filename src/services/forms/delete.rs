use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FormService, load_form};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;

pub async fn delete_form(
    service: &FormService,
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

    match storage.delete_form(form_id).await {
        Ok(true) => {
            info!("Form {} deleted by {}", form_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Form deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        ))),
        Err(e) => {
            error!("Failed to delete form {}: {}", form_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete form: {e}"),
                )),
            )
        }
    }
}
