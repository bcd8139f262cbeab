use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeamService, check_members_enrolled, load_team};
use crate::middlewares::RequireJWT;
use crate::models::teams::requests::UpdateTeamRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;

pub async fn update_team(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
    update_data: UpdateTeamRequest,
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

    let team = match load_team(&storage, team_id).await {
        Ok(team) => team,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_owned_course(&storage, team.course_id, uid).await {
        return Ok(resp);
    }

    if let Some(name) = &update_data.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Team name must not be empty",
        )));
    }

    if let Some(member_ids) = &update_data.member_ids
        && let Err(resp) = check_members_enrolled(&storage, team.course_id, member_ids).await
    {
        return Ok(resp);
    }

    match storage.update_team(team_id, update_data).await {
        Ok(Some(team)) => {
            info!("Team {} updated successfully by {}", team_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(team, "Team updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeamNotFound,
            "Team not found",
        ))),
        Err(e) => {
            error!("Failed to update team {}: {}", team_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update team: {e}"),
                )),
            )
        }
    }
}
