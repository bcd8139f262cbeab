//! 路径参数安全提取器
//!
//! 在进入业务逻辑前校验路径参数格式，解析失败直接返回统一的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String, req_err: &'static str) -> error::Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    error::InternalError::from_response(error::ErrorBadRequest(req_err), response).into()
}

fn extract_positive_i64(req: &HttpRequest, name: &'static str) -> Result<i64, error::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_request(format!("缺少路径参数: {name}"), "missing path parameter"))?;

    let id: i64 = raw
        .parse()
        .map_err(|_| bad_request(format!("路径参数 {name} 不是合法的ID: {raw}"), "invalid id"))?;

    if id <= 0 {
        return Err(bad_request(
            format!("路径参数 {name} 必须为正整数: {id}"),
            "invalid id",
        ));
    }

    Ok(id)
}

macro_rules! define_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = error::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                ready(extract_positive_i64(req, $param).map($name))
            }
        }
    };
}

define_id_extractor!(SafeCourseIdI64, "course_id");
define_id_extractor!(SafeTeamIdI64, "team_id");
define_id_extractor!(SafeFormIdI64, "form_id");
define_id_extractor!(SafeUserIdI64, "user_id");

/// 课程加入码：6 位大写字母或数字
pub struct SafeJoinCode(pub String);

impl FromRequest for SafeJoinCode {
    type Error = error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("join_code") {
            Some(raw) => {
                let code = raw.trim().to_uppercase();
                if code.len() == 6
                    && code
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                {
                    Ok(SafeJoinCode(code))
                } else {
                    Err(bad_request(
                        format!("加入码格式不正确: {raw}"),
                        "invalid join code",
                    ))
                }
            }
            None => Err(bad_request(
                "缺少路径参数: join_code".to_string(),
                "missing path parameter",
            )),
        };
        ready(result)
    }
}
