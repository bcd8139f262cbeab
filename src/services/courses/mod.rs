pub mod create;
pub mod delete;
pub mod get;
pub mod join;
pub mod leave;
pub mod list;
pub mod students;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::PaginationQuery;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, JoinCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 获取课程列表
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 教授创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 根据课程 ID 获取课程信息
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    // 根据加入码获取课程信息（加入前预览）
    pub async fn get_course_by_code(
        &self,
        request: &HttpRequest,
        join_code: String,
    ) -> ActixResult<HttpResponse> {
        get::get_course_by_code(self, request, join_code).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update_data).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 学生通过加入码加入课程
    pub async fn join_course(
        &self,
        request: &HttpRequest,
        join_data: JoinCourseRequest,
    ) -> ActixResult<HttpResponse> {
        join::join_course(self, request, join_data).await
    }

    // 学生退出课程
    pub async fn leave_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        leave::leave_course(self, request, course_id).await
    }

    // 获取课程学生名单
    pub async fn list_course_students(
        &self,
        request: &HttpRequest,
        course_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        students::list_course_students(self, request, course_id, query).await
    }
}

/// 加载课程并校验所有权，仅课程所属教授可通过
pub(crate) async fn load_owned_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    uid: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => {
            if course.professor_id != uid {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "You do not have permission to manage this course",
                )));
            }
            Ok(course)
        }
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to get course {}: {}", course_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course: {e}"),
                )),
            )
        }
    }
}

/// 加载课程并校验成员资格：教授须为课程所有者，学生须已加入课程
pub(crate) async fn load_course_for_member(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    uid: i64,
    role: Option<UserRole>,
) -> Result<Course, HttpResponse> {
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get course {}: {}", course_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course: {e}"),
                )),
            );
        }
    };

    let allowed = match role {
        Some(UserRole::Professor) => course.professor_id == uid,
        Some(UserRole::Student) => match storage.is_student_enrolled(course_id, uid).await {
            Ok(enrolled) => enrolled,
            Err(e) => {
                tracing::error!("Failed to check enrollment: {}", e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check enrollment: {e}"),
                    )),
                );
            }
        },
        None => false,
    };

    if !allowed {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You are not a member of this course",
        )));
    }

    Ok(course)
}
