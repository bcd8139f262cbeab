use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::forms::requests::{CreateFormRequest, RebuildQuestionsRequest, UpdateFormRequest};
use crate::models::users::entities::UserRole;
use crate::services::FormService;
use crate::utils::{SafeCourseIdI64, SafeFormIdI64};

// 懒加载的全局 FormService 实例
static FORM_SERVICE: Lazy<FormService> = Lazy::new(FormService::new_lazy);

pub async fn create_form(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    form_data: web::Json<CreateFormRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .create_form(&req, course_id.0, form_data.into_inner())
        .await
}

pub async fn list_course_forms(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE.list_course_forms(&req, course_id.0).await
}

pub async fn get_form(req: HttpRequest, form_id: SafeFormIdI64) -> ActixResult<HttpResponse> {
    FORM_SERVICE.get_form(&req, form_id.0).await
}

pub async fn update_form(
    req: HttpRequest,
    form_id: SafeFormIdI64,
    update_data: web::Json<UpdateFormRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .update_form(&req, form_id.0, update_data.into_inner())
        .await
}

pub async fn rebuild_questions(
    req: HttpRequest,
    form_id: SafeFormIdI64,
    rebuild_data: web::Json<RebuildQuestionsRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .rebuild_questions(&req, form_id.0, rebuild_data.into_inner())
        .await
}

pub async fn publish_form(req: HttpRequest, form_id: SafeFormIdI64) -> ActixResult<HttpResponse> {
    FORM_SERVICE.publish_form(&req, form_id.0).await
}

pub async fn release_form(req: HttpRequest, form_id: SafeFormIdI64) -> ActixResult<HttpResponse> {
    FORM_SERVICE.release_form(&req, form_id.0).await
}

pub async fn delete_form(req: HttpRequest, form_id: SafeFormIdI64) -> ActixResult<HttpResponse> {
    FORM_SERVICE.delete_form(&req, form_id.0).await
}

// 配置路由
pub fn configure_forms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/forms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 教授看全部，学生只看已发布的表单
                    .route(web::get().to(list_course_forms))
                    .route(
                        web::post()
                            .to(create_form)
                            // 仅开课教授可以建表单
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/forms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{form_id}")
                    .route(web::get().to(get_form))
                    .route(
                        web::put()
                            .to(update_form)
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_form)
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    ),
            )
            .service(
                // 草稿态下整组替换问题
                web::resource("/{form_id}/questions").route(
                    web::put()
                        .to(rebuild_questions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{form_id}/publish").route(
                    web::post()
                        .to(publish_form)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{form_id}/release").route(
                    web::post()
                        .to(release_form)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            ),
    );
}
