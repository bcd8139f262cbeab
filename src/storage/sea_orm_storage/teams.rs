//! 小组存储操作

use super::SeaOrmStorage;
use crate::entity::team_members;
use crate::entity::teams::{ActiveModel, Column, Entity as Teams};
use crate::entity::users;
use crate::errors::{CollabRateError, Result};
use crate::models::teams::{
    entities::{Team, TeamWithMembers},
    requests::{CreateTeamRequest, UpdateTeamRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建小组并写入初始成员
    pub async fn create_team_impl(
        &self,
        course_id: i64,
        req: CreateTeamRequest,
    ) -> Result<TeamWithMembers> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            name: Set(req.name),
            created_at: Set(now),
            ..Default::default()
        };

        let team = model
            .insert(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("创建小组失败: {e}")))?;

        self.set_team_members(team.id, &req.member_ids).await?;

        self.get_team_with_members_impl(team.id)
            .await?
            .ok_or_else(|| CollabRateError::database_operation("小组创建后查询失败"))
    }

    /// 整组替换小组成员
    async fn set_team_members(&self, team_id: i64, member_ids: &[i64]) -> Result<()> {
        team_members::Entity::delete_many()
            .filter(team_members::Column::TeamId.eq(team_id))
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("清空小组成员失败: {e}")))?;

        if member_ids.is_empty() {
            return Ok(());
        }

        let rows: Vec<team_members::ActiveModel> = member_ids
            .iter()
            .map(|&user_id| team_members::ActiveModel {
                team_id: Set(team_id),
                user_id: Set(user_id),
                ..Default::default()
            })
            .collect();

        team_members::Entity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("写入小组成员失败: {e}")))?;

        Ok(())
    }

    /// 通过 ID 获取小组
    pub async fn get_team_by_id_impl(&self, team_id: i64) -> Result<Option<Team>> {
        let result = Teams::find_by_id(team_id)
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_team()))
    }

    /// 获取小组及其成员
    pub async fn get_team_with_members_impl(
        &self,
        team_id: i64,
    ) -> Result<Option<TeamWithMembers>> {
        let team = match self.get_team_by_id_impl(team_id).await? {
            Some(t) => t,
            None => return Ok(None),
        };

        let members = users::Entity::find()
            .join(
                JoinType::InnerJoin,
                users::Relation::TeamMembers.def(),
            )
            .filter(team_members::Column::TeamId.eq(team_id))
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(Some(TeamWithMembers {
            team,
            members: members.into_iter().map(|m| m.into_user()).collect(),
        }))
    }

    /// 列出课程下的小组
    pub async fn list_course_teams_impl(&self, course_id: i64) -> Result<Vec<TeamWithMembers>> {
        let teams = Teams::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询小组列表失败: {e}")))?;

        let mut out = Vec::with_capacity(teams.len());
        for team in teams {
            if let Some(full) = self.get_team_with_members_impl(team.id).await? {
                out.push(full);
            }
        }
        Ok(out)
    }

    /// 更新小组信息
    pub async fn update_team_impl(
        &self,
        team_id: i64,
        update: UpdateTeamRequest,
    ) -> Result<Option<TeamWithMembers>> {
        let existing = self.get_team_by_id_impl(team_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        if let Some(name) = update.name {
            let model = ActiveModel {
                id: Set(team_id),
                name: Set(name),
                ..Default::default()
            };
            model
                .update(&self.db)
                .await
                .map_err(|e| CollabRateError::database_operation(format!("更新小组失败: {e}")))?;
        }

        if let Some(ref member_ids) = update.member_ids {
            self.set_team_members(team_id, member_ids).await?;
        }

        self.get_team_with_members_impl(team_id).await
    }

    /// 删除小组
    pub async fn delete_team_impl(&self, team_id: i64) -> Result<bool> {
        let result = Teams::delete_by_id(team_id)
            .exec(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("删除小组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取学生在课程内所属的小组
    pub async fn get_user_team_in_course_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Team>> {
        let result = Teams::find()
            .join(JoinType::InnerJoin, crate::entity::teams::Relation::TeamMembers.def())
            .filter(Column::CourseId.eq(course_id))
            .filter(team_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询所属小组失败: {e}")))?;

        Ok(result.map(|m| m.into_team()))
    }

    /// 列出小组成员 ID
    pub async fn list_team_member_ids_impl(&self, team_id: i64) -> Result<Vec<i64>> {
        let rows = team_members::Entity::find()
            .filter(team_members::Column::TeamId.eq(team_id))
            .order_by_asc(team_members::Column::UserId)
            .all(&self.db)
            .await
            .map_err(|e| CollabRateError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.user_id).collect())
    }
}
