pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod questions;
pub mod state;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::forms::entities::CourseForm;
use crate::models::forms::requests::{CreateFormRequest, RebuildQuestionsRequest, UpdateFormRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct FormService {
    storage: Option<Arc<dyn Storage>>,
}

impl FormService {
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

    // 在课程下创建评估表单
    pub async fn create_form(
        &self,
        request: &HttpRequest,
        course_id: i64,
        form_data: CreateFormRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_form(self, request, course_id, form_data).await
    }

    // 列出课程下的表单
    pub async fn list_course_forms(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_course_forms(self, request, course_id).await
    }

    // 获取表单及其问题
    pub async fn get_form(&self, request: &HttpRequest, form_id: i64) -> ActixResult<HttpResponse> {
        get::get_form(self, request, form_id).await
    }

    // 更新表单基本信息（仅草稿态）
    pub async fn update_form(
        &self,
        request: &HttpRequest,
        form_id: i64,
        update_data: UpdateFormRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_form(self, request, form_id, update_data).await
    }

    // 整体重建表单问题（仅草稿态）
    pub async fn rebuild_questions(
        &self,
        request: &HttpRequest,
        form_id: i64,
        rebuild_data: RebuildQuestionsRequest,
    ) -> ActixResult<HttpResponse> {
        questions::rebuild_questions(self, request, form_id, rebuild_data).await
    }

    // 发布表单（draft -> published）
    pub async fn publish_form(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        state::publish_form(self, request, form_id).await
    }

    // 公布结果（published -> released）
    pub async fn release_form(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        state::release_form(self, request, form_id).await
    }

    // 删除表单
    pub async fn delete_form(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_form(self, request, form_id).await
    }
}

/// 加载表单，不存在时返回可直接发送的响应
pub(crate) async fn load_form(
    storage: &Arc<dyn Storage>,
    form_id: i64,
) -> Result<CourseForm, HttpResponse> {
    match storage.get_form_by_id(form_id).await {
        Ok(Some(form)) => Ok(form),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FormNotFound,
            "Form not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to get form {}: {}", form_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get form: {e}"),
                )),
            )
        }
    }
}

/// 解析 RFC3339 截止时间为 Unix 时间戳
pub(crate) fn parse_due_at(raw: &str) -> Result<i64, HttpResponse> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp())
        .map_err(|_| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid RFC3339 timestamp: {raw}"),
            ))
        })
}

/// 校验小组全部属于指定课程
pub(crate) async fn check_teams_in_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    team_ids: &[i64],
) -> Result<(), HttpResponse> {
    for &team_id in team_ids {
        match storage.get_team_by_id(team_id).await {
            Ok(Some(team)) if team.course_id == course_id => {}
            Ok(_) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::TeamNotFound,
                    format!("Team {team_id} does not belong to this course"),
                )));
            }
            Err(e) => {
                tracing::error!("Failed to get team {}: {}", team_id, e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to get team: {e}"),
                    )),
                );
            }
        }
    }
    Ok(())
}
