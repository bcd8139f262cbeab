use serde::Deserialize;
use ts_rs::TS;

// 创建表单请求
//
// 按数量批量创建问题，文案走默认值，之后可整体重建。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct CreateFormRequest {
    pub name: String,
    /// RFC3339 带时区的截止时间，为空表示不限时
    pub due_at: Option<String>,
    #[serde(default)]
    pub allow_late: bool,
    #[serde(default)]
    pub self_evaluate: bool,
    /// 不填则使用默认调色板，填则必须恰好 5 个十六进制颜色
    pub colors: Option<Vec<String>>,
    /// Likert 问题数量
    #[serde(default)]
    pub num_likert: u32,
    /// 开放问题数量
    #[serde(default)]
    pub num_open_ended: u32,
    /// 参与评估的小组
    #[serde(default)]
    pub team_ids: Vec<i64>,
}

// 更新表单基本信息请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct UpdateFormRequest {
    pub name: Option<String>,
    /// Some("") 清空截止时间，Some(rfc3339) 设置，None 不变
    pub due_at: Option<String>,
    pub allow_late: Option<bool>,
    pub self_evaluate: Option<bool>,
    pub colors: Option<Vec<String>>,
    pub team_ids: Option<Vec<i64>>,
}

// Likert 问题输入
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct LikertQuestionInput {
    pub prompt: String,
    /// 不填则使用默认文案，填则必须恰好 5 个
    pub option_labels: Option<Vec<String>>,
}

// 开放问题输入
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct OpenEndedQuestionInput {
    pub prompt: String,
}

// 整体重建问题请求
//
// 草稿态下问题整组替换，顺序按数组下标。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct RebuildQuestionsRequest {
    #[serde(default)]
    pub likert: Vec<LikertQuestionInput>,
    #[serde(default)]
    pub open_ended: Vec<OpenEndedQuestionInput>,
}

// 表单写入数据（用于存储层，时间和颜色已校验归一化）
#[derive(Debug, Clone)]
pub struct FormWriteData {
    pub name: String,
    pub due_at: Option<i64>,
    pub allow_late: bool,
    pub self_evaluate: bool,
    pub colors: Vec<String>,
    pub team_ids: Vec<i64>,
}

// 表单更新数据（用于存储层）
//
// due_at 外层 None 表示不变，Some(None) 表示清空截止时间。
#[derive(Debug, Clone, Default)]
pub struct FormUpdateData {
    pub name: Option<String>,
    pub due_at: Option<Option<i64>>,
    pub allow_late: Option<bool>,
    pub self_evaluate: Option<bool>,
    pub colors: Option<Vec<String>>,
    pub team_ids: Option<Vec<i64>>,
}

// 问题种子数据（用于存储层，标签已补全为 5 个）
#[derive(Debug, Clone)]
pub struct LikertQuestionSeed {
    pub prompt: String,
    pub option_labels: Vec<String>,
}
