use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 业务错误码
//
// 0 表示成功，1xxx 为通用错误，2xxx 认证/用户，3xxx 课程/小组，
// 4xxx 表单/问题，5xxx 回答提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,
    RateLimitExceeded = 1005,

    AuthFailed = 2000,
    EmailDomainNotAllowed = 2001,
    UserNotFound = 2100,
    UserUpdateFailed = 2101,

    CourseNotFound = 3000,
    CoursePermissionDenied = 3001,
    CourseCreationFailed = 3002,
    CourseJoinFailed = 3003,
    CourseAlreadyJoined = 3004,
    JoinCodeInvalid = 3005,
    TeamNotFound = 3100,
    TeamCreationFailed = 3101,
    TeamMemberInvalid = 3102,

    FormNotFound = 4000,
    FormNotPublished = 4001,
    FormStateInvalid = 4002,
    FormCreationFailed = 4003,
    QuestionNotFound = 4004,
    ColorInvalid = 4005,

    ResponseValidationFailed = 5000,
    DeadlinePassed = 5001,
    EvaluationPairInvalid = 5002,
    NotEnrolled = 5003,
    ResponseSubmitFailed = 5004,
}
