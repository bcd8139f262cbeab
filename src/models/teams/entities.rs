use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct Team {
    // 小组ID
    pub id: i64,
    // 所属课程ID
    pub course_id: i64,
    // 小组名称
    pub name: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 带成员的小组视图
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamWithMembers {
    #[serde(flatten)]
    #[ts(flatten)]
    pub team: Team,
    pub members: Vec<crate::models::users::entities::User>,
}
