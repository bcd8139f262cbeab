pub mod mine;
pub mod my_results;
pub mod results;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::responses::requests::SubmitResponsesRequest;
use crate::storage::Storage;

pub struct ResponseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResponseService {
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

    // 提交针对一个被评估人的整页回答，重复提交覆盖旧回答
    pub async fn submit_responses(
        &self,
        request: &HttpRequest,
        form_id: i64,
        submit_data: SubmitResponsesRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_responses(self, request, form_id, submit_data).await
    }

    // 查询自己对某个被评估人已提交的回答
    pub async fn my_responses(
        &self,
        request: &HttpRequest,
        form_id: i64,
        evaluee_id: i64,
    ) -> ActixResult<HttpResponse> {
        mine::my_responses(self, request, form_id, evaluee_id).await
    }

    // 教授查看表单的聚合结果
    pub async fn form_results(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::form_results(self, request, form_id).await
    }

    // 学生查看自己收到的聚合结果（仅已公布结果的表单）
    pub async fn my_results(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        my_results::my_results(self, request, form_id).await
    }
}
