pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teams::entities::Team;
use crate::models::teams::requests::{CreateTeamRequest, UpdateTeamRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct TeamService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 在课程下创建小组
    pub async fn create_team(
        &self,
        request: &HttpRequest,
        course_id: i64,
        team_data: CreateTeamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_team(self, request, course_id, team_data).await
    }

    // 列出课程下的小组
    pub async fn list_course_teams(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_course_teams(self, request, course_id).await
    }

    // 根据小组 ID 获取小组及成员
    pub async fn get_team(&self, request: &HttpRequest, team_id: i64) -> ActixResult<HttpResponse> {
        get::get_team(self, request, team_id).await
    }

    // 更新小组信息或成员
    pub async fn update_team(
        &self,
        request: &HttpRequest,
        team_id: i64,
        update_data: UpdateTeamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_team(self, request, team_id, update_data).await
    }

    // 删除小组
    pub async fn delete_team(
        &self,
        request: &HttpRequest,
        team_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_team(self, request, team_id).await
    }
}

/// 加载小组，不存在时返回可直接发送的响应
pub(crate) async fn load_team(
    storage: &Arc<dyn Storage>,
    team_id: i64,
) -> Result<Team, HttpResponse> {
    match storage.get_team_by_id(team_id).await {
        Ok(Some(team)) => Ok(team),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeamNotFound,
            "Team not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to get team {}: {}", team_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get team: {e}"),
                )),
            )
        }
    }
}

/// 校验成员全部为课程内的学生
pub(crate) async fn check_members_enrolled(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    member_ids: &[i64],
) -> Result<(), HttpResponse> {
    for &member_id in member_ids {
        match storage.is_student_enrolled(course_id, member_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::TeamMemberInvalid,
                    format!("User {member_id} is not enrolled in this course"),
                )));
            }
            Err(e) => {
                tracing::error!("Failed to check enrollment for user {}: {}", member_id, e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check enrollment: {e}"),
                    )),
                );
            }
        }
    }
    Ok(())
}
