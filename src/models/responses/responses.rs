use super::entities::{LikertResponse, OpenEndedResponse};
use serde::Serialize;
use ts_rs::TS;

// 自己已提交的回答（按被评估人查询）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct MyResponsesResponse {
    pub evaluee_id: i64,
    pub likert: Vec<LikertResponse>,
    pub open_ended: Vec<OpenEndedResponse>,
}

// 单个 Likert 问题的聚合结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct LikertAggregate {
    pub question_id: i64,
    pub prompt: String,
    // 收到的回答数
    pub count: i64,
    // 平均分，没有回答时为空而不是 0
    pub mean: Option<f64>,
    // 1-5 档各自的回答数
    pub distribution: [i64; 5],
}

// 单个开放问题收到的文字回答，按评估人ID排序
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct OpenEndedAggregate {
    pub question_id: i64,
    pub prompt: String,
    pub answers: Vec<String>,
}

// 一个被评估人在一张表单下的全部聚合结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct EvalueeResults {
    pub evaluee_id: i64,
    pub evaluee_name: String,
    pub likert: Vec<LikertAggregate>,
    pub open_ended: Vec<OpenEndedAggregate>,
}

// 表单结果总览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct FormResultsResponse {
    pub form_id: i64,
    pub evaluees: Vec<EvalueeResults>,
}
