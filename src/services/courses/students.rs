use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course_for_member};
use crate::middlewares::RequireJWT;
use crate::models::common::PaginationQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_course_students(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    query: PaginationQuery,
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

    if let Err(resp) = load_course_for_member(&storage, course_id, uid, role).await {
        return Ok(resp);
    }

    match storage
        .list_course_students_with_pagination(course_id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course student list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course student list: {e}"),
            )),
        ),
    }
}
