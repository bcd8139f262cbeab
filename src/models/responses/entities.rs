use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 回答的业务主键
//
// 同一个 (评估人, 被评估人, 问题) 只保留一份回答，重复提交覆盖旧值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct ResponseKey {
    pub evaluator_id: i64,
    pub evaluee_id: i64,
    pub question_id: i64,
}

// Likert 回答
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct LikertResponse {
    pub id: i64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub key: ResponseKey,
    // 1-5 档评分
    pub rating: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 开放问题回答
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct OpenEndedResponse {
    pub id: i64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub key: ResponseKey,
    pub text: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
