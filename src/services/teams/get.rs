use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeamService, load_team};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_course_for_member;

pub async fn get_team(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
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

    let team = match load_team(&storage, team_id).await {
        Ok(team) => team,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_course_for_member(&storage, team.course_id, uid, role).await {
        return Ok(resp);
    }

    match storage.get_team_with_members(team_id).await {
        Ok(Some(team)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            team,
            "Team information retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeamNotFound,
            "Team not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get team information: {e}"),
            )),
        ),
    }
}
