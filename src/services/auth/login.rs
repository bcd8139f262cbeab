use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::OAuthLoginRequest, responses::LoginResponse},
    users::entities::{User, UserRole, UserStatus},
};
use crate::utils::jwt;
use crate::utils::validate::{validate_email, validate_email_domain};

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: OAuthLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 校验邮箱格式与域名白名单
    if validate_email(&login_request.email).is_err() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Email format is invalid",
        )));
    }
    if let Err(e) = validate_email_domain(&login_request.email, &config.auth.allowed_email_domain) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EmailDomainNotAllowed,
            e,
        )));
    }

    // 2. 按 OAuth subject 查找用户，首次登录自动注册
    let user = match storage
        .get_user_by_oauth_subject(&login_request.subject)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => match register_first_login(service, &login_request, request).await {
            Ok(user) => user,
            Err(resp) => return Ok(resp),
        },
        Err(e) => {
            tracing::error!("Failed to look up user by subject: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 3. 暂停账户不允许登录
    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Account is suspended",
        )));
    }

    // 4. 更新最后登录时间
    let _ = storage.update_last_login(user.id).await;

    // 5. 生成令牌对
    match user
        .generate_token_pair(
            login_request
                .remember_me
                .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)),
        )
        .await
    {
        Ok(token_pair) => {
            tracing::info!("User {} logged in successfully", user.username);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                user,
                created_at: chrono::Utc::now(),
            };

            // 6. 创建 refresh token cookie
            let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

/// 首次登录自动注册，默认角色为学生
async fn register_first_login(
    service: &AuthService,
    login_request: &OAuthLoginRequest,
    request: &HttpRequest,
) -> Result<User, HttpResponse> {
    let storage = service.get_storage(request);

    // 邮箱已被其他身份占用时拒绝注册
    match storage.get_user_by_email(&login_request.email).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Email is already registered with another identity",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to look up user by email: {}", e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    }

    // 用户名取邮箱本地部分
    let username = login_request
        .email
        .split_once('@')
        .map(|(local, _)| local)
        .unwrap_or(login_request.email.as_str());

    match storage
        .create_oauth_user(
            &login_request.subject,
            &login_request.email,
            username,
            &login_request.profile_name,
            UserRole::Student,
        )
        .await
    {
        Ok(user) => {
            tracing::info!("Registered new user {} on first login", user.username);
            Ok(user)
        }
        Err(e) => {
            tracing::error!("Failed to register user on first login: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to register user",
                )),
            )
        }
    }
}
