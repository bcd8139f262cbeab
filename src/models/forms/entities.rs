use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 表单状态
//
// draft -> published -> released，只能向前推进。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub enum FormState {
    Draft,     // 草稿，学生不可见
    Published, // 已发布，接受提交
    Released,  // 已公布结果
}

impl FormState {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
    pub const RELEASED: &'static str = "released";
}

impl<'de> Deserialize<'de> for FormState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            FormState::DRAFT => Ok(FormState::Draft),
            FormState::PUBLISHED => Ok(FormState::Published),
            FormState::RELEASED => Ok(FormState::Released),
            _ => Err(serde::de::Error::custom(format!(
                "无效的表单状态: '{s}'. 支持的状态: draft, published, released"
            ))),
        }
    }
}

impl std::fmt::Display for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormState::Draft => write!(f, "{}", FormState::DRAFT),
            FormState::Published => write!(f, "{}", FormState::PUBLISHED),
            FormState::Released => write!(f, "{}", FormState::RELEASED),
        }
    }
}

impl std::str::FromStr for FormState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(FormState::Draft),
            "published" => Ok(FormState::Published),
            "released" => Ok(FormState::Released),
            _ => Err(format!("Invalid form state: {s}")),
        }
    }
}

// 评估表单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct CourseForm {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub state: FormState,
    // 截止时间，为空表示不限时
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    // 截止后是否仍接受提交
    pub allow_late: bool,
    // 是否要求学生评估自己
    pub self_evaluate: bool,
    // Likert 量表 1-5 档的展示颜色，固定 5 个十六进制值
    pub colors: Vec<String>,
    // 参与评估的小组
    pub team_ids: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Likert 量表问题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct LikertQuestion {
    pub id: i64,
    pub form_id: i64,
    pub prompt: String,
    // 表单内展示顺序
    pub order: i32,
    // 1-5 档的标签文案，固定 5 个
    pub option_labels: Vec<String>,
}

// 开放问题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct OpenEndedQuestion {
    pub id: i64,
    pub form_id: i64,
    pub prompt: String,
    pub order: i32,
}

/// Likert 标签的默认文案，创建表单时按问题数量批量生成
pub const DEFAULT_LIKERT_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// Likert 1-5 档的默认展示颜色
pub const DEFAULT_FORM_COLORS: [&str; 5] = ["#872729", "#C44B4B", "#F2F0EF", "#3D5A80", "#293241"];
