use serde::Deserialize;
use ts_rs::TS;

// 单条 Likert 回答输入
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct LikertAnswerInput {
    pub question_id: i64,
    /// 1-5 档评分
    pub rating: i32,
}

// 单条开放问题回答输入
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct OpenEndedAnswerInput {
    pub question_id: i64,
    pub text: String,
}

// 针对一个被评估人的整页提交
//
// 整页校验通过后逐条 upsert，重复提交覆盖旧回答。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct SubmitResponsesRequest {
    pub evaluee_id: i64,
    #[serde(default)]
    pub likert: Vec<LikertAnswerInput>,
    #[serde(default)]
    pub open_ended: Vec<OpenEndedAnswerInput>,
}
