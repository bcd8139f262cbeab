use super::entities::{CourseForm, LikertQuestion, OpenEndedQuestion};
use serde::Serialize;
use ts_rs::TS;

// 表单及其问题
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct FormDetailResponse {
    pub form: CourseForm,
    pub likert_questions: Vec<LikertQuestion>,
    pub open_ended_questions: Vec<OpenEndedQuestion>,
}

// 表单列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct FormListResponse {
    pub items: Vec<CourseForm>,
}
