use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teams::requests::{CreateTeamRequest, UpdateTeamRequest};
use crate::models::users::entities::UserRole;
use crate::services::TeamService;
use crate::utils::{SafeCourseIdI64, SafeTeamIdI64};

// 懒加载的全局 TeamService 实例
static TEAM_SERVICE: Lazy<TeamService> = Lazy::new(TeamService::new_lazy);

pub async fn create_team(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    team_data: web::Json<CreateTeamRequest>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE
        .create_team(&req, course_id.0, team_data.into_inner())
        .await
}

pub async fn list_course_teams(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.list_course_teams(&req, course_id.0).await
}

pub async fn get_team(req: HttpRequest, team_id: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.get_team(&req, team_id.0).await
}

pub async fn update_team(
    req: HttpRequest,
    team_id: SafeTeamIdI64,
    update_data: web::Json<UpdateTeamRequest>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE
        .update_team(&req, team_id.0, update_data.into_inner())
        .await
}

pub async fn delete_team(req: HttpRequest, team_id: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.delete_team(&req, team_id.0).await
}

// 配置路由
pub fn configure_teams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/teams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_course_teams))
                    .route(
                        web::post()
                            .to(create_team)
                            // 仅开课教授可以分组
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/teams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{team_id}")
                    .route(web::get().to(get_team))
                    .route(
                        web::put()
                            .to(update_team)
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_team)
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    ),
            ),
    );
}
