use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, courses::requests::JoinCourseRequest},
};

pub async fn join_course(
    service: &CourseService,
    request: &HttpRequest,
    join_data: JoinCourseRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let storage = service.get_storage(request);
    let join_code = join_data.join_code.trim().to_uppercase();

    let course = match storage.get_course_by_code(&join_code).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::JoinCodeInvalid,
                "Course not found or join code is invalid",
            )));
        }
        Err(e) => {
            error!("Error getting course by join code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseJoinFailed,
                    "Failed to look up course by join code",
                )),
            );
        }
    };

    match storage.enroll_student(course.id, user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course joined successfully",
        ))),
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error(
            ErrorCode::CourseAlreadyJoined,
            course,
            "User has already joined the course",
        ))),
        Err(e) => {
            error!("Error joining course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseJoinFailed,
                    "Failed to join course",
                )),
            )
        }
    }
}
