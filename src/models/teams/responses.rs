use super::entities::TeamWithMembers;
use serde::Serialize;
use ts_rs::TS;

// 小组响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamResponse {
    pub team: TeamWithMembers,
}

// 小组列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamListResponse {
    pub items: Vec<TeamWithMembers>,
}
