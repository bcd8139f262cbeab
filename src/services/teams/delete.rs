use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeamService, load_team};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::load_owned_course;

pub async fn delete_team(
    service: &TeamService,
    request: &HttpRequest,
    team_id: i64,
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

    match storage.delete_team(team_id).await {
        Ok(true) => {
            info!("Team {} deleted by {}", team_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Team deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeamNotFound,
            "Team not found",
        ))),
        Err(e) => {
            error!("Failed to delete team {}: {}", team_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete team: {e}"),
                )),
            )
        }
    }
}
