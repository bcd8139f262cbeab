use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeamService, check_members_enrolled};
use crate::middlewares::RequireJWT;
use crate::models::teams::requests::CreateTeamRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;

pub async fn create_team(
    service: &TeamService,
    request: &HttpRequest,
    course_id: i64,
    team_data: CreateTeamRequest,
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

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    if team_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Team name must not be empty",
        )));
    }

    if let Err(resp) = check_members_enrolled(&storage, course_id, &team_data.member_ids).await {
        return Ok(resp);
    }

    match storage.create_team(course_id, team_data).await {
        Ok(team) => {
            info!("Team {} created in course {} by {}", team.team.name, course_id, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(team, "Team created successfully")))
        }
        Err(e) => {
            error!("Team creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TeamCreationFailed,
                    format!("Team creation failed: {e}"),
                )),
            )
        }
    }
}
