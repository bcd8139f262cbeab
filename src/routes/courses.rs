use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, JoinCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeCourseIdI64, SafeJoinCode};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course_by_code(
    req: HttpRequest,
    join_code: SafeJoinCode,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course_by_code(&req, join_code.0).await
}

pub async fn join_course(
    req: HttpRequest,
    join_data: web::Json<JoinCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.join_course(&req, join_data.into_inner()).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn leave_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.leave_course(&req, course_id.0).await
}

pub async fn list_course_students(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_course_students(&req, course_id.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教授看自己开的课，学生看自己加入的课
                web::resource("").route(web::get().to(list_courses)).route(
                    web::post()
                        .to(create_course)
                        // 仅教授可以开课
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                // 学生通过加入码加入课程
                web::resource("/join")
                    .route(
                        web::post()
                            .to(join_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    .wrap(middlewares::RateLimit::join_code()),
            )
            .service(
                web::resource("/code/{join_code}")
                    .route(
                        web::get()
                            .to(get_course_by_code)
                            // 学生加入前用加入码预览课程信息
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    .wrap(middlewares::RateLimit::join_code()),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(update_course)
                            // 仅开课教授可以修改课程
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            // 仅开课教授可以删除课程
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    ),
            )
            .service(
                // 学生主动退出课程
                web::resource("/{course_id}/leave").route(
                    web::post()
                        .to(leave_course)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{course_id}/students")
                    .route(web::get().to(list_course_students)),
            ),
    );
}
