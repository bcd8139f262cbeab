use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::responses::requests::SubmitResponsesRequest;
use crate::models::users::entities::UserRole;
use crate::services::ResponseService;
use crate::utils::{SafeFormIdI64, SafeUserIdI64};

// 懒加载的全局 ResponseService 实例
static RESPONSE_SERVICE: Lazy<ResponseService> = Lazy::new(ResponseService::new_lazy);

pub async fn submit_responses(
    req: HttpRequest,
    form_id: SafeFormIdI64,
    submit_data: web::Json<SubmitResponsesRequest>,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .submit_responses(&req, form_id.0, submit_data.into_inner())
        .await
}

pub async fn my_responses(
    req: HttpRequest,
    form_id: SafeFormIdI64,
    evaluee_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE
        .my_responses(&req, form_id.0, evaluee_id.0)
        .await
}

pub async fn form_results(req: HttpRequest, form_id: SafeFormIdI64) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE.form_results(&req, form_id.0).await
}

pub async fn my_results(req: HttpRequest, form_id: SafeFormIdI64) -> ActixResult<HttpResponse> {
    RESPONSE_SERVICE.my_results(&req, form_id.0).await
}

// 配置路由
pub fn configure_responses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/forms/{form_id}/responses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 针对一个被评估人的整页提交，重复提交覆盖旧回答
                web::resource("")
                    .route(
                        web::post()
                            .to(submit_responses)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    .wrap(middlewares::RateLimit::submit()),
            )
            .service(
                // 查询自己对某个被评估人已提交的回答
                web::resource("/mine/{user_id}").route(web::get().to(my_responses)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/forms/{form_id}/results")
            .wrap(middlewares::RequireJWT)
            .service(
                // 仅开课教授可以查看聚合结果
                web::resource("").route(
                    web::get()
                        .to(form_results)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                // 学生查看自己收到的结果，要求表单已公布结果
                web::resource("/mine").route(
                    web::get()
                        .to(my_results)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
