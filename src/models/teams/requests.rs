use serde::Deserialize;
use ts_rs::TS;

// 创建小组请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct CreateTeamRequest {
    pub name: String,
    /// 初始成员（课程内学生ID）
    #[serde(default)]
    pub member_ids: Vec<i64>,
}

// 更新小组请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    /// 不为空时整组替换成员
    pub member_ids: Option<Vec<i64>>,
}
